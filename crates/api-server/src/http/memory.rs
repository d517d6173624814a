use axum::Json;
use axum::body::Bytes;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::models::{MemoryListResponse, MemoryQuery, StoreMemoryRequest, StoreMemoryResponse};
use shared::server_memory::{recall, store};
use tracing::warn;

use super::decode_json_body;
use super::errors::{MEMORY_RETRIEVAL_FAILED, MEMORY_STORAGE_FAILED, failure_response};

pub(super) async fn list_memories(query: Result<Query<MemoryQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(err) => {
            warn!("rejecting memory query: {err}");
            return failure_response(MEMORY_RETRIEVAL_FAILED);
        }
    };

    (
        StatusCode::OK,
        Json(MemoryListResponse {
            success: true,
            memories: recall(&query, Utc::now()),
        }),
    )
        .into_response()
}

pub(super) async fn store_memory(body: Bytes) -> Response {
    let request = match decode_json_body::<StoreMemoryRequest>(&body, MEMORY_STORAGE_FAILED) {
        Ok(request) => request,
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(StoreMemoryResponse {
            success: true,
            memory: store(request, Utc::now()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::http::test_support::{get_request, json_request, send, test_router};

    #[tokio::test]
    async fn get_echoes_session_and_type() {
        let (status, body) = send(
            test_router(),
            get_request("/api/memory?sessionId=session_9&type=long_term"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["memories"][0]["session_id"], "session_9");
        assert_eq!(body["memories"][0]["memory_type"], "long_term");
    }

    #[tokio::test]
    async fn post_acknowledges_without_persisting() {
        let (status, body) = send(
            test_router(),
            json_request(
                Method::POST,
                "/api/memory",
                r#"{"sessionId":"session_9","contextType":"symptom","content":"fever"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["memory"]["stored"], true);
        assert_eq!(body["memory"]["context_type"], "symptom");
        assert_eq!(body["memory"]["content"], "fever");
    }

    #[tokio::test]
    async fn malformed_post_is_storage_failure() {
        let (status, body) =
            send(test_router(), json_request(Method::POST, "/api/memory", "nope")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Memory storage failed");
    }
}
