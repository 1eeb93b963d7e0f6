//! Persistence error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The sink is disabled or lacks credentials
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Sheets API error: {0}")]
    Sheets(String),

    #[error("Sheets rate limited: {0}")]
    RateLimited(String),
}

impl From<tokio_postgres::Error> for PersistenceError {
    fn from(err: tokio_postgres::Error) -> Self {
        PersistenceError::Query(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for PersistenceError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        PersistenceError::Connection(err.to_string())
    }
}

impl From<lettre::error::Error> for PersistenceError {
    fn from(err: lettre::error::Error) -> Self {
        PersistenceError::Email(err.to_string())
    }
}

impl From<lettre::address::AddressError> for PersistenceError {
    fn from(err: lettre::address::AddressError) -> Self {
        PersistenceError::Email(format!("Invalid address: {}", err))
    }
}

impl From<lettre::transport::smtp::Error> for PersistenceError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        PersistenceError::Email(err.to_string())
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        PersistenceError::Sheets(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PersistenceError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PersistenceError::Credentials(err.to_string())
    }
}
