//! Lead intake
//!
//! Forms are validated before anything is written. The relational store is the
//! primary sink and decides the response; e-mail and the spreadsheet log run
//! afterwards on a spawned task and only log their failures.

use chrono::NaiveDateTime;
use serde::Deserialize;

use compliance_agent_persistence::{
    enquiry_id, ist_now, DownloadRecord, EnquiryKind, FeeEnquiry, PersistenceError,
    PersistenceLayer, ServiceEnquiry, SheetRecord, Worksheet,
};

use crate::validation::{first_missing, is_valid_email, is_valid_phone};
use crate::ServerError;

const SHEET_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Body of `POST /request-download`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadForm {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub designation: Option<String>,
    /// Number or numeric string
    pub rating: Option<serde_json::Value>,
    pub state: String,
    pub act_type: String,
}

impl DownloadForm {
    pub fn validate(&self) -> Result<(), ServerError> {
        let missing = first_missing(&[
            ("fullName", self.full_name.as_str()),
            ("companyName", self.company_name.as_str()),
            ("email", self.email.as_str()),
            ("contactNumber", self.contact_number.as_str()),
            ("state", self.state.as_str()),
            ("actType", self.act_type.as_str()),
        ]);
        match missing {
            Some(field) => Err(ServerError::BadRequest(format!("Missing field: {field}"))),
            None => Ok(()),
        }
    }

    pub fn designation(&self) -> &str {
        self.designation.as_deref().unwrap_or("Not Provided")
    }

    pub fn rating(&self) -> i32 {
        let value = match &self.rating {
            Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0) as i64,
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    pub fn to_record(
        &self,
        ip_address: Option<String>,
        user_agent: Option<String>,
        at: NaiveDateTime,
    ) -> DownloadRecord {
        DownloadRecord {
            full_name: self.full_name.clone(),
            company_name: self.company_name.clone(),
            email: self.email.clone(),
            contact_number: self.contact_number.clone(),
            designation: self.designation().to_string(),
            rating: self.rating(),
            state: self.state.clone(),
            act_type: self.act_type.clone(),
            ip_address,
            user_agent,
            requested_at: at,
        }
    }

    /// Where the browser fetches the file once the form is accepted
    pub fn download_url(&self, token: &str, download_id: i64) -> String {
        match self.act_type.strip_prefix("labour_code_") {
            Some("comparison") => format!("/download-labour-code-comparison?id={download_id}"),
            Some(code_key) => format!("/download-labour-code/{code_key}?id={download_id}"),
            None => format!("/generate-pdf/{token}"),
        }
    }
}

fn check_contact(email: &str, phone: &str, email_error: &str, phone_error: &str) -> Result<(), ServerError> {
    if !is_valid_email(email) {
        return Err(ServerError::BadRequest(email_error.to_string()));
    }
    if !is_valid_phone(phone) {
        return Err(ServerError::BadRequest(phone_error.to_string()));
    }
    Ok(())
}

fn missing(field: Option<&str>) -> Result<(), ServerError> {
    match field {
        Some(field) => Err(ServerError::BadRequest(format!("Missing {field}"))),
        None => Ok(()),
    }
}

/// Body of `POST /submit-service-enquiry`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceEnquiryForm {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub service: String,
    pub query: String,
}

impl ServiceEnquiryForm {
    pub fn validate(&self) -> Result<(), ServerError> {
        missing(first_missing(&[
            ("fullName", self.full_name.as_str()),
            ("companyName", self.company_name.as_str()),
            ("email", self.email.as_str()),
            ("contactNumber", self.contact_number.as_str()),
            ("service", self.service.as_str()),
            ("query", self.query.as_str()),
        ]))?;
        check_contact(&self.email, &self.contact_number, "Invalid email format", "Invalid phone number")
    }

    pub fn into_enquiry(self, ip_address: Option<String>, at: NaiveDateTime) -> ServiceEnquiry {
        ServiceEnquiry {
            enquiry_id: enquiry_id(EnquiryKind::Service, at),
            full_name: self.full_name,
            company_name: self.company_name,
            email: self.email,
            contact_number: self.contact_number,
            service: self.service,
            query: self.query,
            ip_address,
            submitted_at: at,
        }
    }
}

/// Body of `POST /submit-fee-enquiry`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeEnquiryForm {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub description: String,
}

impl FeeEnquiryForm {
    pub fn validate(&self) -> Result<(), ServerError> {
        missing(first_missing(&[
            ("fullName", self.full_name.as_str()),
            ("companyName", self.company_name.as_str()),
            ("email", self.email.as_str()),
            ("contactNumber", self.contact_number.as_str()),
            ("description", self.description.as_str()),
        ]))?;
        check_contact(&self.email, &self.contact_number, "Invalid email format", "Invalid phone number")
    }

    pub fn into_enquiry(self, ip_address: Option<String>, at: NaiveDateTime) -> FeeEnquiry {
        FeeEnquiry {
            enquiry_id: enquiry_id(EnquiryKind::Fee, at),
            full_name: self.full_name,
            company_name: self.company_name,
            email: self.email,
            contact_number: self.contact_number,
            description: self.description,
            ip_address,
            submitted_at: at,
        }
    }
}

/// Body of `POST /submit-enquiry`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralEnquiryForm {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub query: String,
}

impl GeneralEnquiryForm {
    pub fn validate(&self) -> Result<(), ServerError> {
        missing(first_missing(&[
            ("fullName", self.full_name.as_str()),
            ("email", self.email.as_str()),
            ("contactNumber", self.contact_number.as_str()),
            ("query", self.query.as_str()),
        ]))?;
        check_contact(&self.email, &self.contact_number, "Invalid email", "Invalid phone")
    }
}

fn field(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

fn timestamp(at: NaiveDateTime) -> (String, String) {
    field("timestamp", at.format(SHEET_TIMESTAMP).to_string())
}

pub fn download_row(record: &DownloadRecord, download_id: Option<i64>) -> SheetRecord {
    vec![
        timestamp(record.requested_at),
        field("full_name", &record.full_name),
        field("company_name", &record.company_name),
        field("email", &record.email),
        field("contact_number", &record.contact_number),
        field("designation", &record.designation),
        field("rating", record.rating.to_string()),
        field("state", &record.state),
        field("act_type", &record.act_type),
        field("ip_address", record.ip_address.clone().unwrap_or_default()),
        field("download_id", download_id.map(|id| id.to_string()).unwrap_or_default()),
    ]
}

pub fn service_row(enquiry: &ServiceEnquiry) -> SheetRecord {
    vec![
        timestamp(enquiry.submitted_at),
        field("enquiry_id", &enquiry.enquiry_id),
        field("full_name", &enquiry.full_name),
        field("company_name", &enquiry.company_name),
        field("email", &enquiry.email),
        field("contact_number", &enquiry.contact_number),
        field("service", &enquiry.service),
        field("query", &enquiry.query),
        field("ip_address", enquiry.ip_address.clone().unwrap_or_default()),
        field("status", "pending"),
    ]
}

pub fn fee_row(enquiry: &FeeEnquiry) -> SheetRecord {
    vec![
        timestamp(enquiry.submitted_at),
        field("enquiry_id", &enquiry.enquiry_id),
        field("full_name", &enquiry.full_name),
        field("company_name", &enquiry.company_name),
        field("email", &enquiry.email),
        field("contact_number", &enquiry.contact_number),
        field("description", &enquiry.description),
        field("ip_address", enquiry.ip_address.clone().unwrap_or_default()),
        field("status", "pending"),
    ]
}

pub fn general_row(form: &GeneralEnquiryForm, at: NaiveDateTime) -> SheetRecord {
    vec![
        timestamp(at),
        field("full_name", &form.full_name),
        field("company_name", &form.company_name),
        field("email", &form.email),
        field("contact_number", &form.contact_number),
        field("query", &form.query),
    ]
}

fn report_sink_failure(sink: &'static str, result: Result<(), PersistenceError>) {
    match result {
        Ok(()) => tracing::debug!(sink, "Secondary sink write succeeded"),
        Err(PersistenceError::NotConfigured(reason)) => {
            tracing::debug!(sink, %reason, "Secondary sink skipped")
        }
        Err(e) => {
            tracing::warn!(sink, error = %e, "Secondary sink write failed");
            metrics::counter!("sink_failures_total", "sink" => sink).increment(1);
        }
    }
}

/// Notify and log a service enquiry in the background
pub fn spawn_service_sinks(persistence: &PersistenceLayer, enquiry: ServiceEnquiry) {
    let persistence = persistence.clone();
    tokio::spawn(async move {
        let notified = persistence.notifier.notify_service_enquiry(&enquiry).await;
        report_sink_failure("email", notified);
        let logged = persistence
            .sheets
            .append(Worksheet::ServiceEnquiries, &service_row(&enquiry))
            .await;
        report_sink_failure("sheet", logged);
    });
}

/// Notify and log a fee enquiry in the background
pub fn spawn_fee_sinks(persistence: &PersistenceLayer, enquiry: FeeEnquiry) {
    let persistence = persistence.clone();
    tokio::spawn(async move {
        let notified = persistence.notifier.notify_fee_enquiry(&enquiry).await;
        report_sink_failure("email", notified);
        let logged = persistence
            .sheets
            .append(Worksheet::FeeEnquiries, &fee_row(&enquiry))
            .await;
        report_sink_failure("sheet", logged);
    });
}

/// Append one row to `sheet` in the background
pub fn spawn_sheet_row(persistence: &PersistenceLayer, sheet: Worksheet, row: SheetRecord) {
    let persistence = persistence.clone();
    tokio::spawn(async move {
        let logged = persistence.sheets.append(sheet, &row).await;
        report_sink_failure("sheet", logged);
    });
}

/// Current IST time for new records
pub fn now() -> NaiveDateTime {
    ist_now()
}
