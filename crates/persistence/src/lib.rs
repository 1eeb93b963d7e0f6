//! Lead persistence and notification sinks
//!
//! Provides:
//! - The relational lead store (downloads, service and fee enquiries, download statistics)
//! - Enquiry notification e-mail over SMTP
//! - The Google Sheets lead log
//!
//! Every external client is created lazily on first use, so the service starts
//! even when PostgreSQL, SMTP or Google are unreachable.

pub mod client;
pub mod error;
pub mod leads;
pub mod mailer;
pub mod schema;
pub mod sheets;

pub use client::PgClient;
pub use error::PersistenceError;
pub use leads::{
    enquiry_id, ist_now, DownloadRecord, EnquiryKind, FeeEnquiry, InMemoryLeadStore, LeadStore,
    PostgresLeadStore, ServiceEnquiry, TableCounts,
};
pub use mailer::{
    sanitize_input, DisabledNotifier, EnquiryNotifier, InMemoryNotifier, SmtpNotifier,
};
pub use sheets::{
    align_row, DisabledSheetSink, GoogleSheetsSink, InMemorySheetSink, SheetRecord, SheetSink,
    Worksheet,
};

use compliance_agent_config::Settings;
use std::sync::Arc;

/// Initialize the persistence layer from settings.
///
/// Nothing connects here. A disabled or unconfigured sink is replaced by a stand-in
/// that reports `NotConfigured`; a disabled database falls back to the in-memory store.
pub fn init(settings: &Settings) -> Result<PersistenceLayer, PersistenceError> {
    let leads: Arc<dyn LeadStore> = if settings.database.enabled {
        tracing::info!(database = %settings.database.name, "Using PostgreSQL lead store");
        Arc::new(PostgresLeadStore::new(PgClient::new(settings.database.clone())))
    } else {
        tracing::warn!("Database disabled, leads are kept in memory only");
        Arc::new(InMemoryLeadStore::new())
    };

    let notifier: Arc<dyn EnquiryNotifier> =
        match SmtpNotifier::new(&settings.email, settings.company.clone()) {
            Ok(notifier) => Arc::new(notifier),
            Err(PersistenceError::NotConfigured(reason)) => {
                tracing::warn!(%reason, "Enquiry e-mail disabled");
                Arc::new(DisabledNotifier::new(reason))
            }
            Err(e) => return Err(e),
        };

    let sheets: Arc<dyn SheetSink> = match GoogleSheetsSink::new(settings.sheets.clone()) {
        Ok(sink) => Arc::new(sink),
        Err(PersistenceError::NotConfigured(reason)) => {
            tracing::warn!(%reason, "Google Sheets logging disabled");
            Arc::new(DisabledSheetSink::new(reason))
        }
        Err(e) => return Err(e),
    };

    Ok(PersistenceLayer {
        leads,
        notifier,
        sheets,
    })
}

/// Combined persistence layer with all sinks
#[derive(Clone)]
pub struct PersistenceLayer {
    pub leads: Arc<dyn LeadStore>,
    pub notifier: Arc<dyn EnquiryNotifier>,
    pub sheets: Arc<dyn SheetSink>,
}

impl PersistenceLayer {
    /// All sinks in memory
    pub fn in_memory() -> Self {
        Self {
            leads: Arc::new(InMemoryLeadStore::new()),
            notifier: Arc::new(InMemoryNotifier::new()),
            sheets: Arc::new(InMemorySheetSink::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_without_external_services() {
        let mut settings = Settings::default();
        settings.database.enabled = false;
        settings.email.password = String::new();
        settings.sheets.enabled = false;

        let layer = init(&settings).unwrap();
        assert!(layer.leads.ping().await.is_ok());
        assert!(matches!(
            layer.sheets.append(Worksheet::Enquiries, &[]).await,
            Err(PersistenceError::NotConfigured(_))
        ));
    }
}
