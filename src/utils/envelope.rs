use serde::Serialize;
use serde_json::Value;

/// Placeholder: every envelope carries this fixed timestamp instead of the
/// current time. Clients already depend on it.
pub const PLACEHOLDER_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub timestamp: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON `null` data and an empty message are dropped like missing ones.
pub fn format_response(success: bool, data: Option<Value>, message: Option<&str>) -> ResponseEnvelope {
    ResponseEnvelope {
        success,
        timestamp: PLACEHOLDER_TIMESTAMP,
        data: data.filter(|d| !d.is_null()),
        message: message
            .filter(|m| !m.is_empty())
            .map(str::to_string),
    }
}
