//! JSON bodies returned by the HTTP endpoints.
//!
//! ```text
//! POST /vlc/status   200  {"response": ["( state playing )", "..."]}
//!                    500  {"error": "failed to read response from VLC: ..."}
//! GET  /health       200  {"connected": true, "remote": "localhost:9000"}
//! ```

use serde::{Deserialize, Serialize};

/// Successful reply to `POST /vlc/{command}`.
///
/// The rc reply is split into its lines so clients do not have to deal with
/// the `\r\n` separators VLC uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub response: Vec<String>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Reply to `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReply {
    /// Whether the rc session currently holds a live connection.
    pub connected: bool,
    /// `host:port` of the rc interface.
    pub remote: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_reply_serializes_response_array() {
        let reply = CommandReply {
            response: vec!["Playing".to_string(), "volume: 256".to_string()],
        };

        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json, serde_json::json!({ "response": ["Playing", "volume: 256"] }));
    }

    #[test]
    fn test_error_reply_uses_error_key() {
        let reply = ErrorReply {
            error: "connection is closed".to_string(),
        };

        let json = serde_json::to_string(&reply).unwrap();

        assert_eq!(json, r#"{"error":"connection is closed"}"#);
    }

    #[test]
    fn test_health_reply_field_names() {
        let reply = HealthReply {
            connected: false,
            remote: "localhost:9000".to_string(),
        };

        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["connected"], false);
        assert_eq!(json["remote"], "localhost:9000");
    }
}
