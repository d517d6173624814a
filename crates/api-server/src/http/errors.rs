use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::bridge::BridgeError;
use shared::models::FailureEnvelope;
use tracing::warn;

pub(super) const CHAT_FAILED: &str = "Gemini CLI processing failed";
pub(super) const CONNECTION_FAILED: &str = "Connection failed";
pub(super) const KNOWLEDGE_FAILED: &str = "Knowledge search failed";
pub(super) const MEMORY_RETRIEVAL_FAILED: &str = "Memory retrieval failed";
pub(super) const MEMORY_STORAGE_FAILED: &str = "Memory storage failed";
pub(super) const FILE_MANAGEMENT_FAILED: &str = "File management operation failed";
pub(super) const FILE_MANAGEMENT_STATUS_FAILED: &str = "Failed to get file management status";
pub(super) const GEMINI_CHAT_FAILED: &str = "Failed to process request";
pub(super) const UNKNOWN_WORKFLOW: &str = "Unknown automation workflow";

pub(super) fn failure_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureEnvelope::new(message)),
    )
        .into_response()
}

/// Logs the underlying cause and answers with the route's generic message.
pub(super) fn bridge_error_response(err: &BridgeError, message: &str) -> Response {
    warn!(backend = %err.backend(), "external service call failed: {err}");
    failure_response(message)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::Value;
    use shared::bridge::{BackendKind, BridgeError};

    use super::{bridge_error_response, failure_response};

    #[tokio::test]
    async fn failure_response_is_uniform_envelope() {
        let response = failure_response("Connection failed");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, serde_json::json!({"success": false, "error": "Connection failed"}));
    }

    #[tokio::test]
    async fn bridge_errors_hide_raw_detail() {
        let err = BridgeError::Transport {
            backend: BackendKind::Automation,
            message: "connection refused (os error 111)".to_string(),
        };
        let response = bridge_error_response(&err, "Translation failed");

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let text = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(text.contains("Translation failed"));
        assert!(!text.contains("os error"));
    }
}
