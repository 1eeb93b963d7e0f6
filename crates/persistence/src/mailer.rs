//! Enquiry notification e-mail

use crate::error::PersistenceError;
use crate::leads::{FeeEnquiry, ServiceEnquiry};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use compliance_agent_config::{CompanyConfig, EmailConfig};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::time::Duration;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Strip tags, escape `& < >` and trim
pub fn sanitize_input(text: &str) -> String {
    TAG.replace_all(text, "")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .trim()
        .to_string()
}

pub fn service_subject(enquiry: &ServiceEnquiry) -> String {
    format!(
        "New Service Enquiry - {} - ID: {}",
        enquiry.service, enquiry.enquiry_id
    )
}

pub fn fee_subject(enquiry: &FeeEnquiry) -> String {
    format!("New Fee Enquiry - ID: {}", enquiry.enquiry_id)
}

fn submitted(at: NaiveDateTime) -> String {
    at.format("%d %b %Y, %I:%M %p IST").to_string()
}

fn field(label: &str, value: &str) -> String {
    format!(
        r#"<div class="field"><div class="label">{}</div><div class="value">{}</div></div>"#,
        label, value
    )
}

fn html_page(heading: &str, accent: &str, enquiry_id: &str, fields: &[String], company: &CompanyConfig) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
body{{font-family:'Segoe UI',Tahoma,sans-serif;line-height:1.6;color:#333;margin:0}}
.container{{max-width:650px;margin:0 auto;padding:20px}}
.header{{background:#1a237e;color:#fff;padding:25px 20px;text-align:center;border-radius:8px 8px 0 0}}
.content{{padding:25px;background:#f9f9f9;border:1px solid #e0e0e0;border-top:none}}
.field{{margin:18px 0;padding:12px 15px;background:#fff;border-left:4px solid {accent}}}
.label{{font-weight:600;color:#1a237e;font-size:14px}}
.value{{font-size:15px;word-break:break-word;white-space:pre-wrap}}
.enquiry-id{{background:{accent};color:#fff;padding:12px;text-align:center;font-weight:600;margin:15px 0}}
.footer{{text-align:center;padding:20px;color:#666;font-size:12px;background:#f5f5f5}}
</style></head><body><div class="container">
<div class="header"><h2>{heading}</h2></div>
<div class="enquiry-id">Enquiry ID: {enquiry_id}</div>
<div class="content">{fields}</div>
<div class="footer"><p><strong>{name}</strong></p><p>{email} | {phone}</p><p>{website}</p></div>
</div></body></html>"#,
        accent = accent,
        heading = heading,
        enquiry_id = enquiry_id,
        fields = fields.concat(),
        name = company.name,
        email = company.email,
        phone = company.phone,
        website = company.website,
    )
}

/// Plain-text and HTML bodies for a service enquiry
pub fn service_bodies(enquiry: &ServiceEnquiry, company: &CompanyConfig) -> (String, String) {
    let time = submitted(enquiry.submitted_at);
    let text = format!(
        "SERVICE ENQUIRY #{}\nName: {} | Company: {}\nEmail: {} | Phone: {}\nService: {}\nQuery: {}\nTime: {}\n--\n{} | {}",
        enquiry.enquiry_id,
        enquiry.full_name,
        enquiry.company_name,
        enquiry.email,
        enquiry.contact_number,
        enquiry.service,
        enquiry.query,
        time,
        company.initials(),
        company.website,
    );
    let fields = [
        field("Full Name", &sanitize_input(&enquiry.full_name)),
        field("Company", &sanitize_input(&enquiry.company_name)),
        field("Email", &sanitize_input(&enquiry.email)),
        field("Phone", &sanitize_input(&enquiry.contact_number)),
        field("Service", &format!("<strong>{}</strong>", sanitize_input(&enquiry.service))),
        field("Query", &sanitize_input(&enquiry.query)),
        field("Submitted", &time),
    ];
    let html = html_page(
        "New Service Enquiry Received",
        "#667eea",
        &enquiry.enquiry_id,
        &fields,
        company,
    );
    (text, html)
}

/// Plain-text and HTML bodies for a fee enquiry
pub fn fee_bodies(enquiry: &FeeEnquiry, company: &CompanyConfig) -> (String, String) {
    let time = submitted(enquiry.submitted_at);
    let text = format!(
        "FEE ENQUIRY #{}\nName: {} | Company: {}\nEmail: {} | Phone: {}\nRequirements: {}\nTime: {}\n--\n{} | {}",
        enquiry.enquiry_id,
        enquiry.full_name,
        enquiry.company_name,
        enquiry.email,
        enquiry.contact_number,
        enquiry.description,
        time,
        company.initials(),
        company.website,
    );
    let fields = [
        field("Full Name", &sanitize_input(&enquiry.full_name)),
        field("Company", &sanitize_input(&enquiry.company_name)),
        field("Email", &sanitize_input(&enquiry.email)),
        field("Phone", &sanitize_input(&enquiry.contact_number)),
        field("Requirements", &sanitize_input(&enquiry.description)),
        field("Submitted", &time),
    ];
    let html = html_page(
        "New Fee Enquiry Received",
        "#ff9800",
        &enquiry.enquiry_id,
        &fields,
        company,
    );
    (text, html)
}

/// Sends a notification per enquiry
#[async_trait]
pub trait EnquiryNotifier: Send + Sync {
    async fn notify_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError>;

    async fn notify_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError>;
}

/// SMTP notifier over implicit TLS
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    service_to: Mailbox,
    fee_to: Mailbox,
    company: CompanyConfig,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig, company: CompanyConfig) -> Result<Self, PersistenceError> {
        if !config.enabled {
            return Err(PersistenceError::NotConfigured("email disabled".to_string()));
        }
        if !config.is_configured() {
            return Err(PersistenceError::NotConfigured(
                "EMAIL_PASSWORD is not set".to_string(),
            ));
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.trim().to_string(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from: config.username.parse()?,
            service_to: config.service_recipient.parse()?,
            fee_to: config.fee_recipient.parse()?,
            company,
        })
    }

    async fn send(
        &self,
        to: &Mailbox,
        reply_to: &str,
        subject: String,
        (text, html): (String, String),
    ) -> Result<(), PersistenceError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject);
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(reply_to, error = %e, "Skipping invalid Reply-To"),
        }
        let message = builder.multipart(MultiPart::alternative_plain_html(text, html))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl EnquiryNotifier for SmtpNotifier {
    async fn notify_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError> {
        self.send(
            &self.service_to,
            &enquiry.email,
            service_subject(enquiry),
            service_bodies(enquiry, &self.company),
        )
        .await?;
        tracing::info!(enquiry_id = %enquiry.enquiry_id, to = %self.service_to, "Service enquiry e-mail sent");
        Ok(())
    }

    async fn notify_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError> {
        self.send(
            &self.fee_to,
            &enquiry.email,
            fee_subject(enquiry),
            fee_bodies(enquiry, &self.company),
        )
        .await?;
        tracing::info!(enquiry_id = %enquiry.enquiry_id, to = %self.fee_to, "Fee enquiry e-mail sent");
        Ok(())
    }
}

/// Notifier used when e-mail is off; every call reports `NotConfigured`
pub struct DisabledNotifier {
    reason: String,
}

impl DisabledNotifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl EnquiryNotifier for DisabledNotifier {
    async fn notify_service_enquiry(&self, _enquiry: &ServiceEnquiry) -> Result<(), PersistenceError> {
        Err(PersistenceError::NotConfigured(self.reason.clone()))
    }

    async fn notify_fee_enquiry(&self, _enquiry: &FeeEnquiry) -> Result<(), PersistenceError> {
        Err(PersistenceError::NotConfigured(self.reason.clone()))
    }
}

/// Records subjects instead of sending
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subjects of every notification so far
    pub fn subjects(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl EnquiryNotifier for InMemoryNotifier {
    async fn notify_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError> {
        self.sent.lock().push(service_subject(enquiry));
        Ok(())
    }

    async fn notify_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError> {
        self.sent.lock().push(fee_subject(enquiry));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn enquiry() -> ServiceEnquiry {
        ServiceEnquiry {
            enquiry_id: "SER-20251121-0A1B2C".to_string(),
            full_name: "Asha <b>Rao</b>".to_string(),
            company_name: "R&D Labs".to_string(),
            email: "asha@acme.in".to_string(),
            contact_number: "9876543210".to_string(),
            service: "Payroll".to_string(),
            query: "Need <script>alert(1)</script> help".to_string(),
            ip_address: None,
            submitted_at: NaiveDate::from_ymd_opt(2025, 11, 21)
                .and_then(|d| d.and_hms_opt(15, 30, 0))
                .unwrap(),
        }
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  <b>Hi</b> & bye "), "Hi &amp; bye");
        assert_eq!(sanitize_input("a < b"), "a &lt; b");
    }

    #[test]
    fn test_subjects() {
        let e = enquiry();
        assert_eq!(
            service_subject(&e),
            "New Service Enquiry - Payroll - ID: SER-20251121-0A1B2C"
        );
    }

    #[test]
    fn test_bodies_escape_user_text() {
        let (text, html) = service_bodies(&enquiry(), &CompanyConfig::default());
        assert!(text.contains("SERVICE ENQUIRY #SER-20251121-0A1B2C"));
        assert!(text.contains("21 Nov 2025, 03:30 PM IST"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("R&amp;D Labs"));
        assert!(html.contains("Asha Rao"));
    }

    #[test]
    fn test_smtp_requires_password() {
        let config = EmailConfig {
            password: String::new(),
            ..EmailConfig::default()
        };
        assert!(matches!(
            SmtpNotifier::new(&config, CompanyConfig::default()),
            Err(PersistenceError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_notifier() {
        let notifier = InMemoryNotifier::new();
        notifier.notify_service_enquiry(&enquiry()).await.unwrap();
        assert_eq!(notifier.subjects().len(), 1);
    }
}
