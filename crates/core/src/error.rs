//! Error types shared by the core crate

use thiserror::Error;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown document category: {0}")]
    UnknownCategory(String),

    #[error("Unknown labour code: {0}")]
    UnknownLabourCode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
