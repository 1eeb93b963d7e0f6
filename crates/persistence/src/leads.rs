//! Lead records and their relational store

use crate::client::PgClient;
use crate::error::PersistenceError;
use crate::schema::TABLES;
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

/// India Standard Time, UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Current wall-clock time in IST without an offset, as stored in `TIMESTAMP` columns
pub fn ist_now() -> NaiveDateTime {
    let now = Utc::now();
    FixedOffset::east_opt(IST_OFFSET_SECS)
        .map(|offset| now.with_timezone(&offset).naive_local())
        .unwrap_or_else(|| now.naive_utc())
}

/// Kind of enquiry, selects the id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryKind {
    Service,
    Fee,
}

impl EnquiryKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Service => "SER",
            Self::Fee => "FEE",
        }
    }
}

/// `{PREFIX}-{YYYYMMDD}-{6 upper hex}`
pub fn enquiry_id(kind: EnquiryKind, at: NaiveDateTime) -> String {
    let bytes: [u8; 3] = rand::random();
    format!(
        "{}-{}-{:02X}{:02X}{:02X}",
        kind.prefix(),
        at.format("%Y%m%d"),
        bytes[0],
        bytes[1],
        bytes[2]
    )
}

/// A lead-capture form submitted before a download
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRecord {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub designation: String,
    pub rating: i32,
    pub state: String,
    pub act_type: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub requested_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceEnquiry {
    pub enquiry_id: String,
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub service: String,
    pub query: String,
    pub ip_address: Option<String>,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeEnquiry {
    pub enquiry_id: String,
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub contact_number: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub submitted_at: NaiveDateTime,
}

/// Row counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub downloads: i64,
    pub service_enquiries: i64,
    pub fee_enquiries: i64,
    pub download_stats: i64,
}

/// Relational store for leads and download statistics
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Round-trip to the database
    async fn ping(&self) -> Result<(), PersistenceError>;

    /// Insert a download and bump its statistics atomically, returning the row id
    async fn record_download(&self, record: &DownloadRecord) -> Result<i64, PersistenceError>;

    async fn record_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError>;

    async fn record_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError>;

    /// Upsert the `(state, act_type)` counter
    async fn bump_download_stats(
        &self,
        state: &str,
        act_type: &str,
        at: NaiveDateTime,
    ) -> Result<(), PersistenceError>;

    async fn table_counts(&self) -> Result<TableCounts, PersistenceError>;
}

const INSERT_DOWNLOAD: &str = r#"
    INSERT INTO downloads
        (full_name, company_name, email, contact_number, designation,
         rating, state, act_type, ip_address, user_agent, download_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    RETURNING id
"#;

const UPSERT_STATS: &str = r#"
    INSERT INTO download_stats (state, act_type, download_count, last_download)
    VALUES ($1, $2, 1, $3)
    ON CONFLICT (state, act_type) DO UPDATE
    SET download_count = download_stats.download_count + 1,
        last_download = EXCLUDED.last_download
"#;

const INSERT_SERVICE_ENQUIRY: &str = r#"
    INSERT INTO service_enquiries
        (enquiry_id, full_name, company_name, email, contact_number,
         service, query, ip_address, status, submission_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
"#;

const INSERT_FEE_ENQUIRY: &str = r#"
    INSERT INTO fee_enquiries
        (enquiry_id, full_name, company_name, email, contact_number,
         description, ip_address, status, submission_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
"#;

/// PostgreSQL-backed lead store
pub struct PostgresLeadStore {
    client: PgClient,
}

impl PostgresLeadStore {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeadStore for PostgresLeadStore {
    async fn ping(&self) -> Result<(), PersistenceError> {
        let conn = self.client.pool().await?.get().await?;
        conn.batch_execute("SELECT 1").await?;
        Ok(())
    }

    async fn record_download(&self, record: &DownloadRecord) -> Result<i64, PersistenceError> {
        let mut conn = self.client.pool().await?.get().await?;
        let tx = conn.transaction().await?;

        let row = tx
            .query_one(
                INSERT_DOWNLOAD,
                &[
                    &record.full_name,
                    &record.company_name,
                    &record.email,
                    &record.contact_number,
                    &record.designation,
                    &record.rating,
                    &record.state,
                    &record.act_type,
                    &record.ip_address,
                    &record.user_agent,
                    &record.requested_at,
                ],
            )
            .await?;
        let id: i32 = row.try_get(0)?;

        tx.execute(
            UPSERT_STATS,
            &[&record.state, &record.act_type, &record.requested_at],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(download_id = id, state = %record.state, act_type = %record.act_type, "Download logged");
        Ok(i64::from(id))
    }

    async fn record_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError> {
        let conn = self.client.pool().await?.get().await?;
        conn.execute(
            INSERT_SERVICE_ENQUIRY,
            &[
                &enquiry.enquiry_id,
                &enquiry.full_name,
                &enquiry.company_name,
                &enquiry.email,
                &enquiry.contact_number,
                &enquiry.service,
                &enquiry.query,
                &enquiry.ip_address,
                &enquiry.submitted_at,
            ],
        )
        .await?;
        tracing::info!(enquiry_id = %enquiry.enquiry_id, "Service enquiry stored");
        Ok(())
    }

    async fn record_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError> {
        let conn = self.client.pool().await?.get().await?;
        conn.execute(
            INSERT_FEE_ENQUIRY,
            &[
                &enquiry.enquiry_id,
                &enquiry.full_name,
                &enquiry.company_name,
                &enquiry.email,
                &enquiry.contact_number,
                &enquiry.description,
                &enquiry.ip_address,
                &enquiry.submitted_at,
            ],
        )
        .await?;
        tracing::info!(enquiry_id = %enquiry.enquiry_id, "Fee enquiry stored");
        Ok(())
    }

    async fn bump_download_stats(
        &self,
        state: &str,
        act_type: &str,
        at: NaiveDateTime,
    ) -> Result<(), PersistenceError> {
        let conn = self.client.pool().await?.get().await?;
        conn.execute(UPSERT_STATS, &[&state, &act_type, &at]).await?;
        Ok(())
    }

    async fn table_counts(&self) -> Result<TableCounts, PersistenceError> {
        let conn = self.client.pool().await?.get().await?;
        let mut counts = [0i64; 4];
        for (slot, table) in counts.iter_mut().zip(TABLES) {
            // Table names come from a fixed list
            let row = conn
                .query_one(format!("SELECT COUNT(*) FROM {}", table).as_str(), &[])
                .await?;
            *slot = row.try_get(0)?;
        }
        Ok(TableCounts {
            downloads: counts[0],
            service_enquiries: counts[1],
            fee_enquiries: counts[2],
            download_stats: counts[3],
        })
    }
}

#[derive(Default)]
struct Tables {
    downloads: Vec<DownloadRecord>,
    service_enquiries: Vec<ServiceEnquiry>,
    fee_enquiries: Vec<FeeEnquiry>,
    stats: HashMap<(String, String), (i64, NaiveDateTime)>,
}

/// In-process lead store, used in tests and when the database is disabled
#[derive(Default)]
pub struct InMemoryLeadStore {
    tables: Mutex<Tables>,
    unavailable: bool,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a connection error
    pub fn unavailable() -> Self {
        Self {
            tables: Mutex::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.unavailable {
            return Err(PersistenceError::Connection("database unavailable".to_string()));
        }
        Ok(())
    }

    pub fn downloads(&self) -> Vec<DownloadRecord> {
        self.tables.lock().downloads.clone()
    }

    pub fn service_enquiries(&self) -> Vec<ServiceEnquiry> {
        self.tables.lock().service_enquiries.clone()
    }

    pub fn fee_enquiries(&self) -> Vec<FeeEnquiry> {
        self.tables.lock().fee_enquiries.clone()
    }

    /// Download count for `(state, act_type)`
    pub fn download_count(&self, state: &str, act_type: &str) -> i64 {
        self.tables
            .lock()
            .stats
            .get(&(state.to_string(), act_type.to_string()))
            .map(|(count, _)| *count)
            .unwrap_or(0)
    }
}

fn bump(tables: &mut Tables, state: &str, act_type: &str, at: NaiveDateTime) {
    let entry = tables
        .stats
        .entry((state.to_string(), act_type.to_string()))
        .or_insert((0, at));
    entry.0 += 1;
    entry.1 = at;
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn ping(&self) -> Result<(), PersistenceError> {
        self.check()
    }

    async fn record_download(&self, record: &DownloadRecord) -> Result<i64, PersistenceError> {
        self.check()?;
        let mut tables = self.tables.lock();
        tables.downloads.push(record.clone());
        bump(&mut tables, &record.state, &record.act_type, record.requested_at);
        Ok(tables.downloads.len() as i64)
    }

    async fn record_service_enquiry(&self, enquiry: &ServiceEnquiry) -> Result<(), PersistenceError> {
        self.check()?;
        let mut tables = self.tables.lock();
        if tables.service_enquiries.iter().any(|e| e.enquiry_id == enquiry.enquiry_id) {
            return Err(PersistenceError::Query(format!(
                "duplicate enquiry_id {}",
                enquiry.enquiry_id
            )));
        }
        tables.service_enquiries.push(enquiry.clone());
        Ok(())
    }

    async fn record_fee_enquiry(&self, enquiry: &FeeEnquiry) -> Result<(), PersistenceError> {
        self.check()?;
        let mut tables = self.tables.lock();
        if tables.fee_enquiries.iter().any(|e| e.enquiry_id == enquiry.enquiry_id) {
            return Err(PersistenceError::Query(format!(
                "duplicate enquiry_id {}",
                enquiry.enquiry_id
            )));
        }
        tables.fee_enquiries.push(enquiry.clone());
        Ok(())
    }

    async fn bump_download_stats(
        &self,
        state: &str,
        act_type: &str,
        at: NaiveDateTime,
    ) -> Result<(), PersistenceError> {
        self.check()?;
        bump(&mut self.tables.lock(), state, act_type, at);
        Ok(())
    }

    async fn table_counts(&self) -> Result<TableCounts, PersistenceError> {
        self.check()?;
        let tables = self.tables.lock();
        Ok(TableCounts {
            downloads: tables.downloads.len() as i64,
            service_enquiries: tables.service_enquiries.len() as i64,
            fee_enquiries: tables.fee_enquiries.len() as i64,
            download_stats: tables.stats.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 21)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
    }

    fn download(state: &str, act_type: &str) -> DownloadRecord {
        DownloadRecord {
            full_name: "Asha Rao".to_string(),
            company_name: "Acme".to_string(),
            email: "asha@acme.in".to_string(),
            contact_number: "9876543210".to_string(),
            designation: "Not Provided".to_string(),
            rating: 0,
            state: state.to_string(),
            act_type: act_type.to_string(),
            ip_address: Some("127.0.0.1".to_string()),
            user_agent: None,
            requested_at: at(),
        }
    }

    #[test]
    fn test_enquiry_id_format() {
        let id = enquiry_id(EnquiryKind::Service, at());
        assert!(id.starts_with("SER-20251121-"));
        let suffix = &id["SER-20251121-".len()..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        assert!(enquiry_id(EnquiryKind::Fee, at()).starts_with("FEE-"));
    }

    #[test]
    fn test_ist_now_is_ahead_of_utc() {
        let diff = ist_now() - Utc::now().naive_utc();
        assert!((diff.num_minutes() - 330).abs() <= 1);
    }

    #[tokio::test]
    async fn test_download_bumps_stats() {
        let store = InMemoryLeadStore::new();
        let first = store.record_download(&download("delhi", "minimum_wages")).await.unwrap();
        let second = store.record_download(&download("delhi", "minimum_wages")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.download_count("delhi", "minimum_wages"), 2);

        store
            .bump_download_stats("India", "labour_code_wages", at())
            .await
            .unwrap();
        let counts = store.table_counts().await.unwrap();
        assert_eq!(counts.downloads, 2);
        assert_eq!(counts.download_stats, 2);
    }

    #[tokio::test]
    async fn test_duplicate_enquiry_rejected() {
        let store = InMemoryLeadStore::new();
        let enquiry = FeeEnquiry {
            enquiry_id: "FEE-20251121-ABCDEF".to_string(),
            full_name: "Asha".to_string(),
            company_name: "Acme".to_string(),
            email: "asha@acme.in".to_string(),
            contact_number: "9876543210".to_string(),
            description: "Monthly payroll compliance".to_string(),
            ip_address: None,
            submitted_at: at(),
        };
        store.record_fee_enquiry(&enquiry).await.unwrap();
        assert!(store.record_fee_enquiry(&enquiry).await.is_err());
        assert_eq!(store.fee_enquiries().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryLeadStore::unavailable();
        assert!(store.ping().await.is_err());
        assert!(matches!(
            store.record_download(&download("goa", "holiday_list")).await,
            Err(PersistenceError::Connection(_))
        ));
    }
}
