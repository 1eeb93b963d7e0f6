//! Document categories served by the agent

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One of the four compliance documents the agent can fetch and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    MinimumWages,
    HolidayList,
    WorkingHours,
    ShopEstablishment,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 4] = [
        Self::MinimumWages,
        Self::HolidayList,
        Self::WorkingHours,
        Self::ShopEstablishment,
    ];

    /// Wire tag, e.g. `minimum_wages`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinimumWages => "minimum_wages",
            Self::HolidayList => "holiday_list",
            Self::WorkingHours => "working_hours",
            Self::ShopEstablishment => "shop_establishment",
        }
    }

    /// Human label used in headings
    pub fn label(&self) -> &'static str {
        match self {
            Self::MinimumWages => "Minimum Wages",
            Self::HolidayList => "Holiday List",
            Self::WorkingHours => "Working Hours",
            Self::ShopEstablishment => "Shop and Establishment",
        }
    }

    /// Act label carried into PDF titles
    pub fn act_label(&self) -> &'static str {
        match self {
            Self::MinimumWages => "Minimum_Wages",
            Self::HolidayList => "Holiday_List",
            Self::WorkingHours => "Working_Hours",
            Self::ShopEstablishment => "Shop_and_Establishment",
        }
    }

    /// Whether source pages for this category publish an effective date
    pub fn has_effective_date(&self) -> bool {
        matches!(self, Self::MinimumWages | Self::WorkingHours)
    }

    /// Parse a wire tag, returning `None` for anything unknown
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "minimum_wages" => Some(Self::MinimumWages),
            "holiday_list" => Some(Self::HolidayList),
            "working_hours" => Some(Self::WorkingHours),
            "shop_establishment" => Some(Self::ShopEstablishment),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for category in DocumentCategory::ALL {
            assert_eq!(DocumentCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(DocumentCategory::parse(" Holiday_List "), Some(DocumentCategory::HolidayList));
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(DocumentCategory::parse("labour_code_wages"), None);
        assert!("gratuity".parse::<DocumentCategory>().is_err());
    }

    #[test]
    fn test_effective_date_categories() {
        assert!(DocumentCategory::MinimumWages.has_effective_date());
        assert!(DocumentCategory::WorkingHours.has_effective_date());
        assert!(!DocumentCategory::HolidayList.has_effective_date());
        assert!(!DocumentCategory::ShopEstablishment.has_effective_date());
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&DocumentCategory::ShopEstablishment).unwrap();
        assert_eq!(json, "\"shop_establishment\"");
    }
}
