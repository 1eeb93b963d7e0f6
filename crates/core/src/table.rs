//! Tabular results produced by the scrapers

use serde::{Deserialize, Serialize};

use crate::{DocumentCategory, StateKey};

/// Rows of trimmed cell text. Row 0 is the header by convention.
pub type TableMatrix = Vec<Vec<String>>;

/// One fetched document, ready for the chat window or the PDF renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// HTML fragment shown in the chat window
    pub presentation_html: String,
    /// Effective date found on the source page
    pub effective_date: Option<String>,
    pub tables: Vec<TableMatrix>,
    /// Display label of the state, `All States` for the shop listing
    pub state: String,
    pub category: DocumentCategory,
}

impl FetchResult {
    pub fn new(state: &StateKey, category: DocumentCategory) -> Self {
        Self {
            presentation_html: String::new(),
            effective_date: None,
            tables: Vec::new(),
            state: state.as_str().to_string(),
            category,
        }
    }

    /// Empty tables are the authoritative "no data" signal
    pub fn has_data(&self) -> bool {
        !self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_data() {
        let mut result = FetchResult::new(&StateKey::new("delhi"), DocumentCategory::HolidayList);
        assert!(!result.has_data());
        result.presentation_html = "<p>Error</p>".into();
        assert!(!result.has_data());
        result.tables.push(vec![vec!["Date".into(), "Holiday".into()]]);
        assert!(result.has_data());
    }
}
