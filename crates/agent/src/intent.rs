//! Intent detection
//!
//! Intents are tried in a fixed order and the first one whose trigger phrase
//! appears in the lowercased message wins. Document intents come first so that
//! "minimum wages of delhi" is never answered from the keyword table.

use compliance_agent_core::knowledge::{self, SERVICE_TRIGGERS};
use compliance_agent_core::labour_codes::LABOUR_CODE_TRIGGERS;
use compliance_agent_core::{DocumentCategory, KeywordEntry};

const SHOP_TRIGGERS: &[&str] = &[
    "shop and establishment",
    "shop establishment",
    "shop & establishment",
    "sea act",
];
const HOLIDAY_TRIGGERS: &[&str] = &["holiday"];
const WORKING_HOURS_TRIGGERS: &[&str] = &["working hours", "working hour"];
const MINIMUM_WAGES_TRIGGERS: &[&str] = &["minimum wage", "minimum wages"];

/// Shop route phrases that ask for the state menu
pub const LISTING_TRIGGERS: &[&str] = &["all states", "list all"];

/// What a chat message is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Empty,
    /// A per-state document; shop & establishment included
    Document(DocumentCategory),
    LabourCodes,
    Services,
    Keyword(&'static KeywordEntry),
    /// Nothing matched, left to the inference fallback
    Unmatched,
}

fn contains_any(message: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| message.contains(t))
}

impl Intent {
    /// Classify an already lowercased and trimmed message
    pub fn detect(message: &str) -> Self {
        if message.is_empty() {
            return Self::Empty;
        }

        let documents = [
            (SHOP_TRIGGERS, DocumentCategory::ShopEstablishment),
            (HOLIDAY_TRIGGERS, DocumentCategory::HolidayList),
            (WORKING_HOURS_TRIGGERS, DocumentCategory::WorkingHours),
            (MINIMUM_WAGES_TRIGGERS, DocumentCategory::MinimumWages),
        ];
        if let Some((_, category)) = documents
            .iter()
            .find(|(triggers, _)| contains_any(message, triggers))
        {
            return Self::Document(*category);
        }

        if contains_any(message, LABOUR_CODE_TRIGGERS) {
            return Self::LabourCodes;
        }
        if contains_any(message, SERVICE_TRIGGERS) {
            return Self::Services;
        }
        knowledge::lookup(message).map_or(Self::Unmatched, Self::Keyword)
    }

    /// Metric label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Document(category) => category.as_str(),
            Self::LabourCodes => "labour_codes",
            Self::Services => "services",
            Self::Keyword(_) => "keyword",
            Self::Unmatched => "unmatched",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_intents() {
        assert_eq!(
            Intent::detect("sea act karnataka"),
            Intent::Document(DocumentCategory::ShopEstablishment)
        );
        assert_eq!(
            Intent::detect("public holidays in goa"),
            Intent::Document(DocumentCategory::HolidayList)
        );
        assert_eq!(
            Intent::detect("working hour rules for delhi"),
            Intent::Document(DocumentCategory::WorkingHours)
        );
        assert_eq!(
            Intent::detect("minimum wages of tamil nadu"),
            Intent::Document(DocumentCategory::MinimumWages)
        );
    }

    #[test]
    fn test_order_of_precedence() {
        // shop route is checked before the holiday route
        assert_eq!(
            Intent::detect("shop and establishment holiday rules"),
            Intent::Document(DocumentCategory::ShopEstablishment)
        );
        // labour codes are checked before the keyword table
        assert_eq!(Intent::detect("new labour codes"), Intent::LabourCodes);
        assert_eq!(Intent::detect("what are your services"), Intent::Services);
    }

    #[test]
    fn test_keyword_and_unmatched() {
        match Intent::detect("epf contribution rate") {
            Intent::Keyword(entry) => assert_eq!(entry.key, "epf"),
            other => panic!("unexpected intent {other:?}"),
        }
        assert_eq!(Intent::detect("hello"), Intent::Unmatched);
        assert_eq!(Intent::detect(""), Intent::Empty);
    }

    #[test]
    fn test_metric_labels() {
        assert_eq!(
            Intent::Document(DocumentCategory::HolidayList).as_str(),
            "holiday_list"
        );
        assert_eq!(Intent::Unmatched.as_str(), "unmatched");
    }
}
