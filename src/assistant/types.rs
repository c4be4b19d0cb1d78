use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::EMPTY_REPLY_PLACEHOLDER;

/// Request body sent to the assistant endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AssistantRequest<'a> {
    pub message: &'a str,
}

/// Reply body. Only string fields count; anything else is treated as missing.
#[derive(Debug, Default, Deserialize)]
pub struct AssistantPayload {
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl AssistantPayload {
    /// `response`, then `message`, then the fixed placeholder
    pub fn into_reply(self) -> String {
        non_empty_text(self.response)
            .or_else(|| non_empty_text(self.message))
            .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_string())
    }
}

fn non_empty_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> String {
        serde_json::from_str::<AssistantPayload>(json)
            .unwrap()
            .into_reply()
    }

    #[test]
    fn test_response_field_wins() {
        assert_eq!(reply(r#"{"response":"Hi!","message":"ignored"}"#), "Hi!");
    }

    #[test]
    fn test_falls_back_to_message() {
        assert_eq!(reply(r#"{"response":"","message":"From message"}"#), "From message");
        assert_eq!(reply(r#"{"message":"Only message"}"#), "Only message");
    }

    #[test]
    fn test_placeholder_when_both_missing_or_empty() {
        assert_eq!(reply("{}"), EMPTY_REPLY_PLACEHOLDER);
        assert_eq!(reply(r#"{"response":null,"message":""}"#), EMPTY_REPLY_PLACEHOLDER);
        assert_eq!(reply(r#"{"response":42}"#), EMPTY_REPLY_PLACEHOLDER);
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(AssistantRequest { message: "Hello" }).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Hello"}));
    }
}
