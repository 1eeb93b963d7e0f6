//! LLM backend implementations

use async_trait::async_trait;
use compliance_agent_config::LlmSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::LlmError;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// API endpoint
    pub endpoint: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    pub temperature: f32,
    /// Generation request timeout
    pub timeout: Duration,
    /// Timeout of the availability probe
    pub probe_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "mistral".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            max_tokens: 100,
            temperature: 0.3,
            timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(2),
        }
    }
}

impl From<&LlmSettings> for LlmConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
            probe_timeout: Duration::from_secs(settings.probe_timeout_secs),
        }
    }
}

/// Prompt used for free-form labour law questions
pub fn labour_law_prompt(question: &str) -> String {
    format!("Question about Indian labor law: {question}\nShort answer:")
}

/// LLM Backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Single-shot completion of `prompt`, trimmed
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Cheap reachability check
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Ollama backend using the non-streaming `/api/generate` endpoint
#[derive(Clone)]
pub struct OllamaBackend {
    client: Client,
    config: LlmConfig,
}

impl OllamaBackend {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Build the API URL
    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.endpoint, path)
    }

    fn request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens as i32,
            },
        }
    }
}

#[async_trait]
impl LlmBackend for OllamaBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.api_url("/generate"))
            .json(&self.request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{}: {}", status, error)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = body.response.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(self.api_url("/tags"))
            .timeout(self.config.probe_timeout)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Backend with a canned answer, for wiring tests and offline runs
#[derive(Debug, Clone)]
pub struct FixedBackend {
    answer: Option<String>,
    available: bool,
}

impl FixedBackend {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            answer: None,
            available: false,
        }
    }
}

#[async_trait]
impl LlmBackend for FixedBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        if !self.available {
            return Err(LlmError::Unavailable("fixed".to_string()));
        }
        self.answer
            .as_ref()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

// Ollama API types
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.probe_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = LlmSettings {
            endpoint: "http://ollama:11434/".to_string(),
            model: "llama3".to_string(),
            ..LlmSettings::default()
        };
        let config = LlmConfig::from(&settings);
        assert_eq!(config.endpoint, "http://ollama:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.max_tokens, settings.max_tokens);
    }

    #[test]
    fn test_api_url() {
        let backend = OllamaBackend::new(LlmConfig::default()).unwrap();
        assert_eq!(backend.api_url("/generate"), "http://localhost:11434/api/generate");
        assert_eq!(backend.model_name(), "mistral");
    }

    #[test]
    fn test_request_serialization() {
        let backend = OllamaBackend::new(LlmConfig::default()).unwrap();
        let prompt = labour_law_prompt("What is gratuity?");
        let json = serde_json::to_value(backend.request(&prompt)).unwrap();
        assert_eq!(json["model"], "mistral");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 100);
        assert_eq!(
            json["prompt"],
            "Question about Indian labor law: What is gratuity?\nShort answer:"
        );
    }

    #[test]
    fn test_response_parsing() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"model":"mistral","response":"  Gratuity is ...  ","done":true}"#)
                .unwrap();
        assert_eq!(body.response.trim(), "Gratuity is ...");
    }

    #[tokio::test]
    async fn test_fixed_backend() {
        let backend = FixedBackend::answering("  ok ");
        assert!(backend.is_available().await);
        assert_eq!(backend.generate("q").await.unwrap(), "ok");

        let down = FixedBackend::unavailable();
        assert!(!down.is_available().await);
        assert!(down.generate("q").await.is_err());
    }
}
