//! Form field validation

use once_cell::sync::Lazy;
use regex::Regex;

pub use compliance_agent_persistence::sanitize_input;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});
static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-\(\)\+]").expect("valid separator pattern"));
static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("valid phone pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Indian mobile number: ten digits starting 6-9 once separators are removed
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = PHONE_SEPARATORS.replace_all(phone, "");
    MOBILE.is_match(&digits)
}

/// Name of the first field whose value is blank
pub fn first_missing<'a>(fields: &[(&'a str, &str)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}
