//! Chat reply payload

use compliance_agent_core::FetchResult;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// JSON body returned by `POST /chat`.
///
/// Only `response` is always present. The flags tell the widget which follow-up
/// buttons to show and are omitted when false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// HTML fragment for the chat window
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_fee_button: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_services: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_labour_codes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_code: Option<String>,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Default::default()
        }
    }

    /// A fetched document, tagged with its state and act type
    pub fn document(result: FetchResult) -> Self {
        Self {
            act_type: Some(result.category.as_str().to_string()),
            state: Some(result.state),
            response: result.presentation_html,
            ..Default::default()
        }
    }

    pub fn with_fee_button(mut self) -> Self {
        self.show_fee_button = true;
        self
    }

    pub fn with_services(mut self) -> Self {
        self.show_services = true;
        self
    }

    /// Mark as a labour code card, optionally for one code
    pub fn with_labour_codes(mut self, specific_code: Option<&str>) -> Self {
        self.show_labour_codes = true;
        self.specific_code = specific_code.map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_agent_core::{DocumentCategory, StateKey};
    use serde_json::json;

    #[test]
    fn test_absent_fields_omitted() {
        let value = serde_json::to_value(ChatReply::text("hi")).unwrap();
        assert_eq!(value, json!({ "response": "hi" }));
    }

    #[test]
    fn test_document_reply() {
        let mut result = FetchResult::new(&StateKey::new("tamil nadu"), DocumentCategory::MinimumWages);
        result.presentation_html = "<div>wages</div>".into();
        let value = serde_json::to_value(ChatReply::document(result)).unwrap();
        assert_eq!(
            value,
            json!({
                "response": "<div>wages</div>",
                "state": "tamil nadu",
                "act_type": "minimum_wages"
            })
        );
    }

    #[test]
    fn test_flags_serialised_when_set() {
        let reply = ChatReply::text("codes").with_labour_codes(Some("code_on_wages"));
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["show_labour_codes"], json!(true));
        assert_eq!(value["specific_code"], json!("code_on_wages"));
        assert!(value.get("show_fee_button").is_none());

        let back: ChatReply = serde_json::from_value(value).unwrap();
        assert_eq!(back, reply);
    }
}
