//! Configuration management for the compliance agent
//!
//! Supports loading configuration from:
//! - `config/default.*` and `config/{env}.*` files (YAML, TOML or JSON)
//! - Environment variables (`COMPLIANCE_AGENT__` prefix, `__` separator)
//! - The flat deployment variables (`DATABASE_URL`, `EMAIL_USER`,
//!   `OLLAMA_HOST`, ...) which seed the defaults

pub mod settings;

pub use settings::{
    load_settings, load_settings_from, CompanyConfig, DatabaseConfig, DownloadsConfig,
    EmailConfig, LlmSettings, ObservabilityConfig, RuntimeEnvironment, ScraperConfig,
    ServerConfig, Settings, SheetsConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration directory not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
