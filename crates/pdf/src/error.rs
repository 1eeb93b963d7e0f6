//! PDF error types

use thiserror::Error;

/// Errors raised while assembling a document
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Content encoding failed: {0}")]
    Content(String),

    #[error("Failed to write document: {0}")]
    Write(String),

    #[error("Unusable logo: {0}")]
    Logo(String),
}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError::Content(err.to_string())
    }
}
