//! Scraper error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("No page registered for {0}")]
    NotFound(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout
        } else {
            ScrapeError::Network(err.to_string())
        }
    }
}
