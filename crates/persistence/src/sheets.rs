//! Google Sheets lead log
//!
//! Rows are appended to named worksheets of one spreadsheet through the Sheets v4
//! REST API, authenticated as a service account (RS256 JWT bearer grant). Each
//! record is aligned to the worksheet's own header row, so reordered or extra
//! columns in the sheet are tolerated.

use crate::error::PersistenceError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use compliance_agent_config::SheetsConfig;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex as AsyncMutex, OnceCell};

use crate::leads::ist_now;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const NEW_SHEET_ROWS: u32 = 2000;
const NEW_SHEET_COLUMNS: u32 = 30;
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the token actually expires
const TOKEN_SLACK: Duration = Duration::from_secs(60);

/// Worksheets written by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Worksheet {
    Downloads,
    ServiceEnquiries,
    FeeEnquiries,
    Enquiries,
}

impl Worksheet {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Downloads => "Downloads",
            Self::ServiceEnquiries => "Service_Enquiries",
            Self::FeeEnquiries => "Fee_Enquiries",
            Self::Enquiries => "Enquiries",
        }
    }

    /// Header row written to a fresh worksheet
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Downloads => &[
                "Timestamp",
                "Full Name",
                "Company Name",
                "Email",
                "Contact Number",
                "Designation",
                "Rating",
                "State",
                "Act Type",
                "IP Address",
                "Download ID",
            ],
            Self::ServiceEnquiries => &[
                "Timestamp",
                "Enquiry ID",
                "Full Name",
                "Company Name",
                "Email",
                "Contact Number",
                "Service",
                "Query",
                "IP Address",
                "Status",
            ],
            Self::FeeEnquiries => &[
                "Timestamp",
                "Enquiry ID",
                "Full Name",
                "Company Name",
                "Email",
                "Contact Number",
                "Description",
                "IP Address",
                "Status",
            ],
            Self::Enquiries => &[
                "Timestamp",
                "Full Name",
                "Company Name",
                "Email",
                "Contact Number",
                "Query",
            ],
        }
    }
}

/// Key/value pairs of one sheet row, keys in any spelling of the header
pub type SheetRecord = Vec<(String, String)>;

/// `"Contact Number"` -> `"contact_number"`
pub fn normalise_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// Order `record` by `headers`. Unknown headers get an empty cell and a missing
/// `timestamp` is filled with `now`.
pub fn align_row(headers: &[String], record: &[(String, String)], now: NaiveDateTime) -> Vec<String> {
    let normalised: Vec<(String, &str)> = record
        .iter()
        .map(|(k, v)| (normalise_key(k), v.as_str()))
        .collect();
    let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    headers
        .iter()
        .map(|header| {
            let key = normalise_key(header);
            match normalised.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => value.trim().to_string(),
                None if key == "timestamp" => stamp.clone(),
                None => String::new(),
            }
        })
        .collect()
}

/// How long to wait before retrying after `error` on zero-based `attempt`
pub fn retry_delay(error: &PersistenceError, attempt: u32) -> Duration {
    match error {
        PersistenceError::RateLimited(_) => Duration::from_secs(2u64.pow(attempt)),
        _ => Duration::from_secs(1),
    }
}

fn is_rate_limited(status: StatusCode, body: &str) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || body.contains("Quota exceeded")
        || body.contains("Rate limit")
        || body.contains("RATE_LIMIT_EXCEEDED")
}

/// Appends rows to a worksheet
#[async_trait]
pub trait SheetSink: Send + Sync {
    async fn append(&self, sheet: Worksheet, record: &[(String, String)]) -> Result<(), PersistenceError>;
}

#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    TOKEN_LIFETIME_SECS as u64
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Authenticated Sheets session, built on first append
struct SheetsSession {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

/// Google Sheets sink authenticated with a service-account key file
pub struct GoogleSheetsSink {
    http: Client,
    config: SheetsConfig,
    session: OnceCell<SheetsSession>,
    append_lock: AsyncMutex<()>,
}

impl GoogleSheetsSink {
    pub fn new(config: SheetsConfig) -> Result<Self, PersistenceError> {
        if !config.enabled {
            return Err(PersistenceError::NotConfigured("sheets disabled".to_string()));
        }
        if config.spreadsheet_id.trim().is_empty() {
            return Err(PersistenceError::NotConfigured(
                "GOOGLE_SHEET_ID is not set".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PersistenceError::Sheets(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session: OnceCell::new(),
            append_lock: AsyncMutex::new(()),
        })
    }

    async fn session(&self) -> Result<&SheetsSession, PersistenceError> {
        self.session
            .get_or_try_init(|| async {
                let path = &self.config.credentials_path;
                let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
                    PersistenceError::Credentials(format!("Cannot read {}: {}", path, e))
                })?;
                let key: ServiceAccountKey = serde_json::from_str(&raw)
                    .map_err(|e| PersistenceError::Credentials(e.to_string()))?;
                let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
                tracing::info!(service_account = %key.client_email, "Google Sheets credentials loaded");
                Ok(SheetsSession {
                    key,
                    encoding_key,
                    token: Mutex::new(None),
                })
            })
            .await
    }

    async fn access_token(&self, session: &SheetsSession) -> Result<String, PersistenceError> {
        if let Some(token) = session.token.lock().as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &session.key.client_email,
            scope: SCOPE,
            aud: &session.key.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &session.encoding_key)?;

        let response = self
            .http
            .post(&session.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Credentials(format!("Token exchange failed {}: {}", status, body)));
        }
        let token: TokenResponse = response.json().await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_SLACK);
        *session.token.lock() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn spreadsheet_url(&self, suffix: &str) -> String {
        format!("{}/{}{}", SHEETS_API, self.config.spreadsheet_id, suffix)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PersistenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if is_rate_limited(status, &body) {
            Err(PersistenceError::RateLimited(body))
        } else {
            Err(PersistenceError::Sheets(format!("{}: {}", status, body)))
        }
    }

    async fn ensure_worksheet(&self, token: &str, sheet: Worksheet) -> Result<(), PersistenceError> {
        let response = self
            .http
            .get(self.spreadsheet_url(""))
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = Self::check(response).await?.json().await?;
        if meta.sheets.iter().any(|s| s.properties.title == sheet.title()) {
            return Ok(());
        }

        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": sheet.title(),
                        "gridProperties": {
                            "rowCount": NEW_SHEET_ROWS,
                            "columnCount": NEW_SHEET_COLUMNS,
                        }
                    }
                }
            }]
        });
        let response = self
            .http
            .post(self.spreadsheet_url(":batchUpdate"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!(worksheet = sheet.title(), "Created new worksheet");
        Ok(())
    }

    async fn header_row(&self, token: &str, sheet: Worksheet) -> Result<Vec<String>, PersistenceError> {
        let response = self
            .http
            .get(self.spreadsheet_url(&format!("/values/{}!1:1", sheet.title())))
            .bearer_auth(token)
            .send()
            .await?;
        let range: ValueRange = Self::check(response).await?.json().await?;
        Ok(range.values.into_iter().next().unwrap_or_default())
    }

    async fn append_values(&self, token: &str, sheet: Worksheet, row: &[String]) -> Result<(), PersistenceError> {
        let response = self
            .http
            .post(self.spreadsheet_url(&format!("/values/{}!A1:append", sheet.title())))
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn try_append(&self, sheet: Worksheet, record: &[(String, String)]) -> Result<(), PersistenceError> {
        let session = self.session().await?;
        let token = self.access_token(session).await?;

        self.ensure_worksheet(&token, sheet).await?;
        let mut headers = self.header_row(&token, sheet).await?;
        if headers.is_empty() {
            headers = sheet.headers().iter().map(|h| h.to_string()).collect();
            self.append_values(&token, sheet, &headers).await?;
            tracing::info!(worksheet = sheet.title(), "Added headers");
        }

        let row = align_row(&headers, record, ist_now());
        self.append_values(&token, sheet, &row).await
    }
}

#[async_trait]
impl SheetSink for GoogleSheetsSink {
    async fn append(&self, sheet: Worksheet, record: &[(String, String)]) -> Result<(), PersistenceError> {
        let _guard = self.append_lock.lock().await;
        let attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            match self.try_append(sheet, record).await {
                Ok(()) => {
                    tracing::info!(worksheet = sheet.title(), "Data logged to Google Sheet");
                    return Ok(());
                }
                // Missing credentials will not fix themselves
                Err(e @ (PersistenceError::Credentials(_) | PersistenceError::NotConfigured(_))) => {
                    return Err(e)
                }
                Err(e) if attempt + 1 >= attempts => return Err(e),
                Err(e) => {
                    let delay = retry_delay(&e, attempt);
                    tracing::warn!(
                        worksheet = sheet.title(),
                        attempt = attempt + 1,
                        attempts,
                        delay_secs = delay.as_secs(),
                        error = %e,
                        "Sheet append failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Sink used when the spreadsheet is off; every call reports `NotConfigured`
pub struct DisabledSheetSink {
    reason: String,
}

impl DisabledSheetSink {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl SheetSink for DisabledSheetSink {
    async fn append(&self, _sheet: Worksheet, _record: &[(String, String)]) -> Result<(), PersistenceError> {
        Err(PersistenceError::NotConfigured(self.reason.clone()))
    }
}

/// Keeps aligned rows per worksheet in memory
#[derive(Default)]
pub struct InMemorySheetSink {
    rows: Mutex<Vec<(Worksheet, Vec<String>)>>,
}

impl InMemorySheetSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, sheet: Worksheet) -> Vec<Vec<String>> {
        self.rows
            .lock()
            .iter()
            .filter(|(s, _)| *s == sheet)
            .map(|(_, row)| row.clone())
            .collect()
    }
}

#[async_trait]
impl SheetSink for InMemorySheetSink {
    async fn append(&self, sheet: Worksheet, record: &[(String, String)]) -> Result<(), PersistenceError> {
        let headers: Vec<String> = sheet.headers().iter().map(|h| h.to_string()).collect();
        let row = align_row(&headers, record, ist_now());
        self.rows.lock().push((sheet, row));
        Ok(())
    }
}
