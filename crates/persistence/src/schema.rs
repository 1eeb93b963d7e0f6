//! PostgreSQL schema creation

use crate::error::PersistenceError;
use deadpool_postgres::Client;

const DOWNLOADS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS downloads (
        id SERIAL PRIMARY KEY,
        full_name TEXT NOT NULL,
        company_name TEXT NOT NULL,
        email TEXT NOT NULL,
        contact_number TEXT NOT NULL,
        designation TEXT NOT NULL,
        rating INTEGER NOT NULL,
        state TEXT NOT NULL,
        act_type TEXT NOT NULL,
        ip_address TEXT,
        user_agent TEXT,
        download_date TIMESTAMP,
        pdf_generated BOOLEAN DEFAULT FALSE,
        pdf_path TEXT
    )
"#;

const SERVICE_ENQUIRIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS service_enquiries (
        id SERIAL PRIMARY KEY,
        enquiry_id TEXT UNIQUE NOT NULL,
        full_name TEXT NOT NULL,
        company_name TEXT NOT NULL,
        email TEXT NOT NULL,
        contact_number TEXT NOT NULL,
        service TEXT NOT NULL,
        query TEXT NOT NULL,
        ip_address TEXT,
        status TEXT DEFAULT 'pending',
        submission_date TIMESTAMP,
        email_sent BOOLEAN DEFAULT TRUE,
        notes TEXT
    )
"#;

const FEE_ENQUIRIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS fee_enquiries (
        id SERIAL PRIMARY KEY,
        enquiry_id TEXT UNIQUE NOT NULL,
        full_name TEXT NOT NULL,
        company_name TEXT NOT NULL,
        email TEXT NOT NULL,
        contact_number TEXT NOT NULL,
        description TEXT NOT NULL,
        ip_address TEXT,
        status TEXT DEFAULT 'pending',
        submission_date TIMESTAMP,
        email_sent BOOLEAN DEFAULT TRUE,
        notes TEXT
    )
"#;

const DOWNLOAD_STATS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS download_stats (
        id SERIAL PRIMARY KEY,
        state TEXT NOT NULL,
        act_type TEXT NOT NULL,
        download_count INTEGER DEFAULT 0,
        last_download TIMESTAMP,
        UNIQUE(state, act_type)
    )
"#;

const INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_downloads_email ON downloads(email);
    CREATE INDEX IF NOT EXISTS idx_downloads_date ON downloads(download_date);
    CREATE INDEX IF NOT EXISTS idx_enquiries_email ON service_enquiries(email);
    CREATE INDEX IF NOT EXISTS idx_fee_enquiries_email ON fee_enquiries(email);
"#;

/// Tables counted by `/db-status`, in display order
pub const TABLES: [&str; 4] = ["downloads", "service_enquiries", "fee_enquiries", "download_stats"];

/// Create all required tables and indexes
pub async fn create_tables(client: &Client) -> Result<(), PersistenceError> {
    let tables = [
        ("downloads", DOWNLOADS_TABLE),
        ("service_enquiries", SERVICE_ENQUIRIES_TABLE),
        ("fee_enquiries", FEE_ENQUIRIES_TABLE),
        ("download_stats", DOWNLOAD_STATS_TABLE),
    ];

    for (name, ddl) in tables {
        client.batch_execute(ddl).await.map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create {} table: {}", name, e))
        })?;
    }

    client
        .batch_execute(INDEXES)
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create indexes: {}", e)))?;

    tracing::info!("All tables created successfully");
    Ok(())
}
