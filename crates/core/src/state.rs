//! Canonical state keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical lowercase state or union territory name, e.g. `tamil nadu`.
///
/// Every URL map and the variant table are keyed by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_lowercase())
    }

    /// Reverse of [`StateKey::slug`]: `tamil_nadu` -> `tamil nadu`
    pub fn from_slug(slug: &str) -> Self {
        Self::new(slug.replace('_', " "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased name for display, e.g. `Tamil Nadu`
    pub fn display_name(&self) -> String {
        title_case(&self.0)
    }

    /// Underscore slug used in URLs and filenames
    pub fn slug(&self) -> String {
        self.0.replace(' ', "_")
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        let key = StateKey::new("  Tamil Nadu ");
        assert_eq!(key.as_str(), "tamil nadu");
    }

    #[test]
    fn test_display_and_slug() {
        let key = StateKey::new("jammu and kashmir");
        assert_eq!(key.display_name(), "Jammu And Kashmir");
        assert_eq!(key.slug(), "jammu_and_kashmir");
        assert_eq!(StateKey::from_slug("Jammu_and_Kashmir"), key);
    }

    #[test]
    fn test_title_case_punctuation() {
        assert_eq!(title_case("j&k"), "J&K");
        assert_eq!(title_case("minimum wages"), "Minimum Wages");
    }
}
