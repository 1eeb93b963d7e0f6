//! Chat dispatcher

use std::sync::Arc;

use compliance_agent_config::CompanyConfig;
use compliance_agent_core::{
    DocumentCategory, KeywordEntry, LabourCode, StateResolver, LABOUR_CODES, SERVICES,
};
use compliance_agent_llm::{labour_law_prompt, LlmBackend};
use compliance_agent_scraper::render::escape;
use compliance_agent_scraper::{DocumentService, ShopSelection};

use crate::intent::LISTING_TRIGGERS;
use crate::{messages, ChatReply, Intent};

/// Routes a chat message to the first intent that claims it
pub struct ChatDispatcher {
    documents: Arc<DocumentService>,
    resolver: StateResolver,
    llm: Option<Arc<dyn LlmBackend>>,
    company: CompanyConfig,
}

impl ChatDispatcher {
    /// Dispatcher without an inference fallback
    pub fn new(documents: Arc<DocumentService>, company: CompanyConfig) -> Self {
        let resolver = StateResolver::new(*documents.vocabulary());
        Self {
            documents,
            resolver,
            llm: None,
            company,
        }
    }

    /// Forward unmatched messages to `backend` before the static fallback
    pub fn with_llm(mut self, backend: Arc<dyn LlmBackend>) -> Self {
        self.llm = Some(backend);
        self
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Answer one chat message. Never fails: every route ends in some reply.
    pub async fn reply(&self, message: &str) -> ChatReply {
        let message = message.trim().to_lowercase();
        let intent = Intent::detect(&message);
        metrics::counter!("chat_requests_total", "intent" => intent.as_str()).increment(1);
        tracing::debug!(intent = intent.as_str(), "Dispatching chat message");

        match intent {
            Intent::Empty => ChatReply::text(messages::EMPTY_PROMPT),
            Intent::Document(DocumentCategory::ShopEstablishment) => self.shop(&message).await,
            Intent::Document(category) => self.document(&message, category).await,
            Intent::LabourCodes => labour_codes(&message),
            Intent::Services => ChatReply::text(messages::service_cards(SERVICES)).with_services(),
            Intent::Keyword(entry) => keyword(entry),
            Intent::Unmatched => match self.infer(&message).await {
                Some(answer) => ChatReply::text(answer),
                None => ChatReply::text(messages::contact_fallback(&self.company)),
            },
        }
    }

    async fn shop(&self, message: &str) -> ChatReply {
        let category = DocumentCategory::ShopEstablishment;
        if let Some(resolution) = self.resolver.resolve(message, category) {
            let result = self
                .documents
                .fetch_shop(ShopSelection::State(resolution.state))
                .await;
            return ChatReply::document(result);
        }
        if LISTING_TRIGGERS.iter().any(|t| message.contains(t)) {
            return ChatReply::document(self.documents.fetch_shop(ShopSelection::AllStates).await);
        }
        ChatReply::text(messages::specify_state(category))
    }

    async fn document(&self, message: &str, category: DocumentCategory) -> ChatReply {
        let Some(resolution) = self.resolver.resolve(message, category) else {
            return ChatReply::text(messages::specify_state(category));
        };

        match self.documents.fetch(category, &resolution.state).await {
            Some(result) if result.has_data() => ChatReply::document(result),
            _ => {
                tracing::info!(
                    state = %resolution.state,
                    category = %category,
                    "No usable tables for resolved state"
                );
                ChatReply::text(messages::no_data(category, &resolution.state))
            }
        }
    }

    /// Best-effort answer from the inference backend
    async fn infer(&self, message: &str) -> Option<String> {
        let backend = self.llm.as_ref()?;
        if !backend.is_available().await {
            tracing::debug!(model = backend.model_name(), "Inference backend unreachable");
            return None;
        }

        match backend.generate(&labour_law_prompt(message)).await {
            Ok(answer) if !answer.trim().is_empty() => Some(escape(answer.trim())),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(model = backend.model_name(), error = %e, "Inference fallback failed");
                None
            }
        }
    }
}

fn labour_codes(message: &str) -> ChatReply {
    match LabourCode::matching(message) {
        Some(code) => {
            ChatReply::text(messages::labour_code_card(code)).with_labour_codes(Some(code.key))
        }
        None => ChatReply::text(messages::labour_code_overview(LABOUR_CODES)).with_labour_codes(None),
    }
}

fn keyword(entry: &KeywordEntry) -> ChatReply {
    if entry.shows_fee_button() {
        ChatReply::text(entry.response).with_fee_button()
    } else if entry.lists_related_services() {
        ChatReply::text(messages::with_related_services(entry.response))
    } else {
        ChatReply::text(entry.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_agent_llm::FixedBackend;
    use compliance_agent_scraper::InMemoryPages;

    fn dispatcher(pages: InMemoryPages) -> ChatDispatcher {
        let documents = DocumentService::new(Arc::new(pages)).unwrap();
        ChatDispatcher::new(Arc::new(documents), CompanyConfig::default())
    }

    #[tokio::test]
    async fn test_empty_message_prompt() {
        let reply = dispatcher(InMemoryPages::new()).reply("   ").await;
        assert_eq!(reply, ChatReply::text(messages::EMPTY_PROMPT));
    }

    #[tokio::test]
    async fn test_shop_without_state() {
        let d = dispatcher(InMemoryPages::new());
        let reply = d.reply("Shop and Establishment act please").await;
        assert!(reply.response.contains("Please Specify a State"));
        assert!(reply.state.is_none());

        let listing = d.reply("shop and establishment for all states").await;
        assert_eq!(listing.state.as_deref(), Some("All States"));
        assert_eq!(listing.act_type.as_deref(), Some("shop_establishment"));
        assert!(listing.response.contains("Select a State"));
    }

    #[tokio::test]
    async fn test_holiday_unknown_state() {
        let reply = dispatcher(InMemoryPages::new()).reply("holiday list please").await;
        assert!(reply.response.contains("Please Specify a State"));
        assert!(reply.response.contains("Holiday list of Maharashtra"));
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_no_data() {
        let reply = dispatcher(InMemoryPages::new())
            .reply("working hours of delhi")
            .await;
        assert!(reply.response.contains("No Working Hours Data Found"));
        assert!(reply.act_type.is_none());
    }

    #[tokio::test]
    async fn test_labour_code_routes() {
        let d = dispatcher(InMemoryPages::new());
        let card = d.reply("Tell me about the Code on Wages").await;
        assert!(card.show_labour_codes);
        assert_eq!(card.specific_code.as_deref(), Some("code_on_wages"));

        let overview = d.reply("new labour codes").await;
        assert!(overview.show_labour_codes);
        assert!(overview.specific_code.is_none());
        assert!(overview.response.contains("New Labour Codes 2025"));
    }

    #[tokio::test]
    async fn test_keyword_flags() {
        let d = dispatcher(InMemoryPages::new());
        assert!(d.reply("how much do you charge").await.show_fee_button);

        let epf = d.reply("epf contribution rate").await;
        assert!(!epf.show_fee_button);
        assert!(epf.response.contains("Related Services:"));

        let services = d.reply("list of services").await;
        assert!(services.show_services);
    }

    #[tokio::test]
    async fn test_inference_fallback() {
        let d = dispatcher(InMemoryPages::new())
            .with_llm(Arc::new(FixedBackend::answering("Gratuity needs <5 years>.")));
        let reply = d.reply("what is the meaning of life").await;
        assert_eq!(reply.response, "Gratuity needs &lt;5 years&gt;.");
    }

    #[tokio::test]
    async fn test_unavailable_backend_uses_static_fallback() {
        let d = dispatcher(InMemoryPages::new()).with_llm(Arc::new(FixedBackend::unavailable()));
        assert!(d.has_llm());
        let reply = d.reply("what is the meaning of life").await;
        assert!(reply.response.contains("+91 9999329153"));
    }
}
