//! Page fetchers

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use crate::ScrapeError;

/// Retrieves the raw HTML of a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// reqwest-backed fetcher with a browser user agent and a hard timeout
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Fixed url -> html map
#[derive(Default)]
pub struct InMemoryPages {
    pages: RwLock<HashMap<String, String>>,
}

impl InMemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().insert(url.into(), html.into());
    }

    pub fn remove(&self, url: &str) {
        self.pages.write().remove(url);
    }
}

#[async_trait]
impl PageFetcher for InMemoryPages {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.pages
            .read()
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::NotFound(url.to_string()))
    }
}
