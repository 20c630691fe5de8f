//! # Response Envelopes
//!
//! Every response body is wrapped in `{ success, ... }`.

use serde::Serialize;

/// Successful response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of items in `data`, for list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Single payload
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            deleted_count: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// List payload with its length
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::data(data)
        }
    }
}

impl Envelope<()> {
    /// Bulk delete result, which carries no payload
    pub fn deleted_all(count: usize) -> Self {
        Self {
            success: true,
            message: Some("All books deleted successfully".to_string()),
            count: None,
            deleted_count: Some(count),
            data: None,
        }
    }
}

/// Failed response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,

    /// Short error category
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
            messages: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = Some(messages);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_serialization() {
        let envelope = Envelope::list(vec![json!({"id": "1"}), json!({"id": "2"})]);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);
        assert_eq!(value["data"][1]["id"], "2");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_deleted_all_envelope_has_no_data() {
        let value = serde_json::to_value(Envelope::deleted_all(3)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "All books deleted successfully",
                "deletedCount": 3
            })
        );
    }

    #[test]
    fn test_error_envelope_serialization() {
        let envelope = ErrorEnvelope::new("Validation failed")
            .with_messages(vec!["Title is required".to_string()]);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Validation failed");
        assert_eq!(value["messages"][0], "Title is required");
        assert!(value.get("message").is_none());
    }
}
