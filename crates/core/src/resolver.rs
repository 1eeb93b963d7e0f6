//! State detection from free text
//!
//! Matching is plain substring containment over the lowercased message, in this order:
//! 1. a canonical key appears in the message
//! 2. a registered variant appears in the message
//! 3. a phrase pulled out by one of the fallback patterns contains a key or variant
//!
//! Short variants such as `mp` or `hp` can match inside unrelated words
//! (`imphal` resolves to Madhya Pradesh). Tokenised matching would change what
//! users see, so the behaviour is kept as is.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{DocumentCategory, StateEntry, StateKey, Vocabulary};

static EXTRACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:of|for|in)\s+([a-zA-Z\s]+?)(?:\?|$|\.)",
        r"([a-zA-Z\s]+?)\s+(?:state|act|rules|law)",
        r"what is .*? (?:act|rules|law) (?:of|for|in) ([a-zA-Z\s]+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// A resolved state together with the page to fetch for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: StateKey,
    pub source_url: &'static str,
}

/// Resolves which state a message is about
#[derive(Debug, Clone, Copy, Default)]
pub struct StateResolver {
    vocabulary: Vocabulary,
}

impl StateResolver {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Find the state `message` refers to among those that publish `category`.
    ///
    /// Returns `None` when nothing matches. The first rule that hits wins.
    pub fn resolve(&self, message: &str, category: DocumentCategory) -> Option<Resolution> {
        let message = message.to_lowercase();
        if message.trim().is_empty() {
            return None;
        }

        let found = self
            .by_key(&message, category)
            .or_else(|| self.by_variant(&message, category))
            .or_else(|| {
                let phrase = extract_phrase(&message)?;
                tracing::trace!(phrase = %phrase, "Falling back to extracted phrase");
                self.by_variant(&phrase, category)
            })?;

        let source_url = found.url(category)?;
        Some(Resolution {
            state: found.state_key(),
            source_url,
        })
    }

    fn by_key(&self, text: &str, category: DocumentCategory) -> Option<&'static StateEntry> {
        self.vocabulary
            .candidates(category)
            .find(|entry| text.contains(entry.key))
    }

    fn by_variant(&self, text: &str, category: DocumentCategory) -> Option<&'static StateEntry> {
        self.vocabulary
            .candidates(category)
            .find(|entry| entry.variants.iter().any(|v| text.contains(v)))
    }
}

/// Candidate state phrase from patterns like `... of <X>` or `<X> act`
fn extract_phrase(message: &str) -> Option<String> {
    EXTRACTION_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Variants swallowed by an earlier, shorter variant
    const SHADOWED: &[(&str, &str)] = &[("imphal", "madhya pradesh"), ("jodhpur", "himachal pradesh")];

    #[test]
    fn test_every_variant_resolves_to_its_state() {
        let resolver = StateResolver::default();
        for category in [DocumentCategory::MinimumWages, DocumentCategory::ShopEstablishment] {
            for entry in resolver.vocabulary().candidates(category) {
                for variant in entry.variants {
                    let resolved = resolver
                        .resolve(variant, category)
                        .unwrap_or_else(|| panic!("{variant} did not resolve"));
                    let expected = SHADOWED
                        .iter()
                        .find(|(v, _)| v == variant)
                        .map(|(_, s)| *s)
                        .unwrap_or(entry.key);
                    assert_eq!(resolved.state.as_str(), expected, "variant {variant}");
                }
            }
        }
    }

    #[test]
    fn test_empty_message_resolves_nothing() {
        let resolver = StateResolver::default();
        for category in DocumentCategory::ALL {
            assert_eq!(resolver.resolve("", category), None);
            assert_eq!(resolver.resolve("   ", category), None);
        }
    }

    #[test]
    fn test_key_beats_variant() {
        let resolver = StateResolver::default();
        let res = resolver
            .resolve("Minimum wages of Tamil Nadu", DocumentCategory::MinimumWages)
            .unwrap();
        assert_eq!(res.state.as_str(), "tamil nadu");
        assert_eq!(res.source_url, "https://www.slci.in/minimum-wages/tamil-nadu/");
    }

    #[test]
    fn test_city_variant() {
        let resolver = StateResolver::default();
        let res = resolver
            .resolve("holiday list for bengaluru", DocumentCategory::HolidayList)
            .unwrap();
        assert_eq!(res.state.as_str(), "karnataka");
        assert_eq!(res.source_url, "https://www.slci.in/karnataka-holiday-list/");
    }

    #[test]
    fn test_category_without_page() {
        let resolver = StateResolver::default();
        assert!(resolver.resolve("holiday list of ladakh", DocumentCategory::HolidayList).is_none());
        assert!(resolver.resolve("minimum wages of ladakh", DocumentCategory::MinimumWages).is_some());
    }

    #[test]
    fn test_mizoram_has_no_working_hours_page() {
        let resolver = StateResolver::new(Vocabulary::builtin());
        assert!(resolver
            .resolve("working hours of mizoram", DocumentCategory::WorkingHours)
            .is_none());
        assert!(resolver
            .resolve("holiday list of mizoram", DocumentCategory::HolidayList)
            .is_some());
    }

    #[test]
    fn test_shop_resolution_uses_shared_page() {
        let resolver = StateResolver::default();
        let res = resolver
            .resolve("shop and establishment act of pondicherry", DocumentCategory::ShopEstablishment)
            .unwrap();
        assert_eq!(res.state.as_str(), "puducherry");
        assert_eq!(res.source_url, crate::SHOP_ESTABLISHMENT_URL);
    }

    #[test]
    fn test_unknown_state() {
        let resolver = StateResolver::default();
        assert!(resolver.resolve("hello", DocumentCategory::MinimumWages).is_none());
        assert!(resolver
            .resolve("minimum wages of atlantis", DocumentCategory::MinimumWages)
            .is_none());
    }

    #[test]
    fn test_extract_phrase() {
        assert_eq!(extract_phrase("wages of kerala?").as_deref(), Some("kerala"));
        assert_eq!(extract_phrase("gujarat act").as_deref(), Some("gujarat"));
        assert_eq!(extract_phrase("hello"), None);
    }
}
