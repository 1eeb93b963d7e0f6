//! Compliance Agent Server
//!
//! HTTP endpoints for the chat window, the lead-gated PDF downloads and the
//! enquiry forms.

pub mod downloads;
pub mod http;
pub mod intake;
pub mod metrics;
pub mod state;
pub mod validation;

pub use downloads::{PendingDownload, PendingDownloads, RedeemError};
pub use http::create_router;
pub use metrics::init_metrics;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use compliance_agent_pdf::PdfError;
use compliance_agent_persistence::PersistenceError;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Gone(String),

    #[error("Database error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Gone(_) => StatusCode::GONE,
            ServerError::Persistence(_)
            | ServerError::Pdf(_)
            | ServerError::Configuration(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        StatusCode::from(&err)
    }
}

impl ServerError {
    /// Text shown to the client. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Persistence(_) => "Database error - please try again".to_string(),
            Self::Pdf(_) => "Failed to generate PDF".to_string(),
            Self::Configuration(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": self.public_message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            StatusCode::from(ServerError::BadRequest("Missing email".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StatusCode::from(ServerError::Gone("Download token expired".into())),
            StatusCode::GONE
        );
        assert_eq!(
            StatusCode::from(ServerError::Persistence(PersistenceError::Query("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_details() {
        let err = ServerError::Persistence(PersistenceError::Connection("secret host".into()));
        assert_eq!(err.public_message(), "Database error - please try again");
        assert_eq!(
            ServerError::NotFound("Invalid labour code".into()).public_message(),
            "Invalid labour code"
        );
    }
}
