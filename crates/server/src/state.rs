//! Application State
//!
//! Shared state across all handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;

use compliance_agent_agent::ChatDispatcher;
use compliance_agent_config::{CompanyConfig, Settings};
use compliance_agent_llm::{LlmBackend, LlmConfig, OllamaBackend};
use compliance_agent_pdf::{Branding, Logo, PdfRenderer};
use compliance_agent_persistence::PersistenceLayer;
use compliance_agent_scraper::{DocumentService, HttpPageFetcher, PageFetcher};

use crate::downloads::PendingDownloads;
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub documents: Arc<DocumentService>,
    pub dispatcher: Arc<ChatDispatcher>,
    pub renderer: Arc<PdfRenderer>,
    pub persistence: PersistenceLayer,
    pub downloads: Arc<PendingDownloads>,
    /// Inference backend, `None` when disabled in settings
    pub llm: Option<Arc<dyn LlmBackend>>,
    /// Prometheus exporter, `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the services together from already-built parts
    pub fn new(
        settings: Settings,
        fetcher: Arc<dyn PageFetcher>,
        persistence: PersistenceLayer,
        llm: Option<Arc<dyn LlmBackend>>,
    ) -> Result<Self, ServerError> {
        let documents = Arc::new(
            DocumentService::new(fetcher)
                .map_err(|e| ServerError::Configuration(e.to_string()))?,
        );

        let mut dispatcher = ChatDispatcher::new(documents.clone(), settings.company.clone());
        if let Some(backend) = &llm {
            dispatcher = dispatcher.with_llm(backend.clone());
        }

        let renderer = PdfRenderer::new(branding(&settings.company));
        let downloads = PendingDownloads::new(Duration::from_secs(settings.downloads.token_ttl_secs));

        Ok(Self {
            settings: Arc::new(settings),
            documents,
            dispatcher: Arc::new(dispatcher),
            renderer: Arc::new(renderer),
            persistence,
            downloads: Arc::new(downloads),
            llm,
            metrics: None,
        })
    }

    /// Production state: HTTP page fetcher and Ollama backend built from settings
    pub fn from_settings(settings: Settings, persistence: PersistenceLayer) -> Result<Self, ServerError> {
        let fetcher = HttpPageFetcher::new(
            &settings.scraper.user_agent,
            Duration::from_secs(settings.scraper.timeout_secs),
        )
        .map_err(|e| ServerError::Configuration(e.to_string()))?;

        let llm: Option<Arc<dyn LlmBackend>> = if settings.llm.enabled {
            let backend = OllamaBackend::new(LlmConfig::from(&settings.llm))
                .map_err(|e| ServerError::Configuration(e.to_string()))?;
            tracing::info!(model = %settings.llm.model, endpoint = %settings.llm.endpoint, "Inference fallback enabled");
            Some(Arc::new(backend))
        } else {
            tracing::info!("Inference fallback disabled");
            None
        };

        Self::new(settings, Arc::new(fetcher), persistence, llm)
    }

    /// Attach the Prometheus exporter rendered at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Name reported by `/check-ollama`
    pub fn model_name(&self) -> &str {
        match &self.llm {
            Some(backend) => backend.model_name(),
            None => &self.settings.llm.model,
        }
    }
}

/// Company branding for reports, with the logo when it can be read
fn branding(company: &CompanyConfig) -> Branding {
    let branding = Branding::new(company.name.clone(), company.website.clone());
    if company.logo_path.is_empty() {
        return branding;
    }
    if !Path::new(&company.logo_path).exists() {
        tracing::debug!(path = %company.logo_path, "No logo file, reports carry no watermark");
        return branding;
    }
    match Logo::open(&company.logo_path) {
        Ok(logo) => branding.with_logo(logo),
        Err(e) => {
            tracing::warn!(error = %e, "Logo unusable, reports carry no watermark");
            branding
        }
    }
}
