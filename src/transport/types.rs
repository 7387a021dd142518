//! Wire types for `POST /v1/chat/message`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body sent for every user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session the message belongs to
    pub session_id: String,
    /// Trimmed user text, never empty
    pub text: String,
}

impl ChatRequest {
    /// Build a request for a session
    pub fn new(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
        }
    }
}

/// Decoded reply body
///
/// Only `text` matters for display. The backend's bookkeeping fields are kept
/// when they are present and well-typed, and dropped otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    /// Reply text; `None` means the body did not have the expected shape
    pub text: Option<String>,
    /// Backend-assigned reply identifier
    pub reply_id: Option<String>,
    /// Slots the backend still needs
    pub missing_info: Vec<String>,
    /// Whether the backend considers the conversation complete
    pub complete: Option<bool>,
    /// Booking reference, once one exists
    pub booking_id: Option<String>,
}

impl ChatReply {
    /// Reply carrying only a text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Extract the known fields from any JSON value
    pub fn from_value(value: &Value) -> Self {
        let string_field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            text: string_field("text"),
            reply_id: string_field("reply_id"),
            missing_info: value
                .get("missing_info")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            complete: value.get("complete").and_then(Value::as_bool),
            booking_id: string_field("booking_id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest::new("s-1", "Hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"session_id": "s-1", "text": "Hello"}));
    }

    #[test]
    fn test_reply_from_full_backend_body() {
        let reply = ChatReply::from_value(&json!({
            "session_id": "s-1",
            "reply_id": "r-9",
            "text": "What is your destination city?",
            "slots": {"or_city": "Paris"},
            "missing_info": ["dst_city", "dep_date"],
            "complete": false,
            "booking_id": null
        }));
        assert_eq!(reply.text.as_deref(), Some("What is your destination city?"));
        assert_eq!(reply.reply_id.as_deref(), Some("r-9"));
        assert_eq!(reply.missing_info, vec!["dst_city", "dep_date"]);
        assert_eq!(reply.complete, Some(false));
        assert!(reply.booking_id.is_none());
    }

    #[test]
    fn test_reply_without_text_string() {
        assert!(ChatReply::from_value(&json!({"message": "hi"})).text.is_none());
        assert!(ChatReply::from_value(&json!({"text": 3})).text.is_none());
        assert!(ChatReply::from_value(&json!(["text"])).text.is_none());
    }
}
