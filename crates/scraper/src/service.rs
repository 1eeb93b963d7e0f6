//! Per-category document fetchers

use std::sync::Arc;

use compliance_agent_core::{
    DocumentCategory, FetchResult, StateKey, TableMatrix, Vocabulary, SHOP_ESTABLISHMENT_URL,
};
use scraper::Html;

use crate::{filter_tables_for_state, render, PageFetcher, ScrapeError, TableExtractor};

/// What the shop & establishment fetcher should produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopSelection {
    /// The menu of every known state, no table content
    AllStates,
    State(StateKey),
}

/// Fetches a category page for a state and turns it into a [`FetchResult`]
pub struct DocumentService {
    fetcher: Arc<dyn PageFetcher>,
    extractor: TableExtractor,
    vocabulary: Vocabulary,
}

impl DocumentService {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Result<Self, ScrapeError> {
        Self::with_vocabulary(fetcher, Vocabulary::builtin())
    }

    pub fn with_vocabulary(
        fetcher: Arc<dyn PageFetcher>,
        vocabulary: Vocabulary,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher,
            extractor: TableExtractor::new()?,
            vocabulary,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Fetch `category` for `state`.
    ///
    /// `None` when the state has no page for the category. A failed fetch still
    /// yields a result, with empty tables and an error fragment.
    pub async fn fetch(&self, category: DocumentCategory, state: &StateKey) -> Option<FetchResult> {
        if category == DocumentCategory::ShopEstablishment {
            self.vocabulary.get(state.as_str())?;
            return Some(self.fetch_shop(ShopSelection::State(state.clone())).await);
        }

        let url = self.vocabulary.source_url(category, state)?;
        let mut result = FetchResult::new(state, category);

        match self.fetcher.fetch(url).await {
            Ok(body) => {
                let (tables, effective_date) = self.parse(&body, category);
                tracing::debug!(
                    state = %state,
                    category = %category,
                    tables = tables.len(),
                    "Fetched document"
                );
                result.presentation_html =
                    render::document(category, state, url, effective_date.as_deref(), &tables);
                result.effective_date = effective_date;
                result.tables = tables;
            }
            Err(e) => {
                tracing::warn!(state = %state, category = %category, url, error = %e, "Page fetch failed");
                metrics::counter!("page_fetch_failures_total", "category" => category.as_str())
                    .increment(1);
                result.presentation_html = render::fetch_error(category, state);
            }
        }

        Some(result)
    }

    /// Shop & establishment rows for one state, or the state menu
    pub async fn fetch_shop(&self, selection: ShopSelection) -> FetchResult {
        let category = DocumentCategory::ShopEstablishment;
        let state = match selection {
            ShopSelection::AllStates => {
                let keys = self.vocabulary.keys(category);
                return FetchResult {
                    presentation_html: render::shop_state_listing(&keys),
                    effective_date: None,
                    tables: Vec::new(),
                    state: "All States".to_string(),
                    category,
                };
            }
            ShopSelection::State(state) => state,
        };

        let mut result = FetchResult::new(&state, category);
        match self.fetcher.fetch(SHOP_ESTABLISHMENT_URL).await {
            Ok(body) => {
                let (tables, _) = self.parse(&body, category);
                let variants = self.vocabulary.variants(&state);
                let filtered = filter_tables_for_state(&tables, state.as_str(), variants);
                tracing::debug!(
                    state = %state,
                    source_tables = tables.len(),
                    matched_tables = filtered.len(),
                    "Filtered shop & establishment tables"
                );
                result.presentation_html = render::shop_document(&state, &filtered);
                result.tables = filtered;
            }
            Err(e) => {
                tracing::warn!(state = %state, error = %e, "Shop & establishment fetch failed");
                metrics::counter!("page_fetch_failures_total", "category" => category.as_str())
                    .increment(1);
                result.presentation_html = render::shop_fetch_error(&state);
            }
        }
        result
    }

    // Html is not Send, keep it out of the async bodies
    fn parse(&self, body: &str, category: DocumentCategory) -> (Vec<TableMatrix>, Option<String>) {
        let document = Html::parse_document(body);
        let tables = self.extractor.extract_tables(&document);
        let effective_date = if category.has_effective_date() {
            self.extractor.extract_effective_date(&document)
        } else {
            None
        };
        (tables, effective_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryPages;

    const WAGES_PAGE: &str = r#"<html><body>
        <p>Effective from Date: 1st October 2025</p>
        <table><tr><th>Class</th><th>Per Day</th></tr><tr><td>Unskilled</td><td>783</td></tr></table>
    </body></html>"#;

    const SHOP_PAGE: &str = r#"<html><body><table>
        <tr><th>State</th><th>Hours</th></tr>
        <tr><td>Delhi</td><td>9am-6pm</td></tr>
        <tr><td>Karnataka</td><td>10am-7pm</td></tr>
    </table></body></html>"#;

    fn service(pages: InMemoryPages) -> DocumentService {
        DocumentService::new(Arc::new(pages)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_minimum_wages() {
        let pages = InMemoryPages::new()
            .with_page("https://www.slci.in/minimum-wages/tamil-nadu/", WAGES_PAGE);
        let svc = service(pages);

        let result = svc
            .fetch(DocumentCategory::MinimumWages, &StateKey::new("tamil nadu"))
            .await
            .unwrap();
        assert_eq!(result.state, "tamil nadu");
        assert_eq!(result.effective_date.as_deref(), Some("1st October 2025"));
        assert_eq!(result.tables.len(), 1);
        assert!(result.presentation_html.contains("Minimum Wages – Tamil Nadu"));
    }

    #[tokio::test]
    async fn test_holiday_skips_effective_date() {
        let pages = InMemoryPages::new()
            .with_page("https://www.slci.in/goa-holiday-list/", WAGES_PAGE);
        let svc = service(pages);

        let result = svc
            .fetch(DocumentCategory::HolidayList, &StateKey::new("goa"))
            .await
            .unwrap();
        assert_eq!(result.effective_date, None);
        assert!(result.has_data());
    }

    #[tokio::test]
    async fn test_unknown_state_yields_none() {
        let svc = service(InMemoryPages::new());
        assert!(svc
            .fetch(DocumentCategory::HolidayList, &StateKey::new("ladakh"))
            .await
            .is_none());
        assert!(svc
            .fetch(DocumentCategory::ShopEstablishment, &StateKey::new("atlantis"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades() {
        let svc = service(InMemoryPages::new());
        let result = svc
            .fetch(DocumentCategory::WorkingHours, &StateKey::new("delhi"))
            .await
            .unwrap();
        assert!(!result.has_data());
        assert!(result.presentation_html.contains("Error fetching"));
    }

    #[tokio::test]
    async fn test_shop_filtering() {
        let pages = InMemoryPages::new().with_page(SHOP_ESTABLISHMENT_URL, SHOP_PAGE);
        let svc = service(pages);

        let delhi = svc
            .fetch_shop(ShopSelection::State(StateKey::new("delhi")))
            .await;
        assert_eq!(delhi.tables.len(), 1);
        assert_eq!(delhi.tables[0].len(), 2);
        assert_eq!(delhi.tables[0][1][0], "Delhi");

        let kerala = svc
            .fetch_shop(ShopSelection::State(StateKey::new("kerala")))
            .await;
        assert!(kerala.tables.is_empty());
        assert!(kerala.presentation_html.contains("No specific Shop"));
    }

    #[tokio::test]
    async fn test_shop_all_states_listing() {
        // No page registered: the listing must not touch the network
        let svc = service(InMemoryPages::new());
        let result = svc.fetch_shop(ShopSelection::AllStates).await;
        assert_eq!(result.state, "All States");
        assert!(result.tables.is_empty());
        assert!(result.presentation_html.contains("Andaman And Nicobar"));
        assert!(result.presentation_html.contains("West Bengal"));
    }

    #[tokio::test]
    async fn test_shop_fetch_failure() {
        let svc = service(InMemoryPages::new());
        let result = svc
            .fetch_shop(ShopSelection::State(StateKey::new("goa")))
            .await;
        assert!(result.tables.is_empty());
        assert!(result.presentation_html.contains("Error fetching Shop"));
    }
}
