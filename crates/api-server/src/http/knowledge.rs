use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::knowledge::search;
use shared::models::{KnowledgeQuery, KnowledgeResponse};
use tracing::warn;

use super::errors::{KNOWLEDGE_FAILED, failure_response};

pub(super) async fn search_knowledge(
    query: Result<Query<KnowledgeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(err) => {
            warn!("rejecting knowledge query: {err}");
            return failure_response(KNOWLEDGE_FAILED);
        }
    };

    let (entries, total) = search(&query, Utc::now());
    (
        StatusCode::OK,
        Json(KnowledgeResponse {
            success: true,
            entries,
            total,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http::test_support::{get_request, send, test_router};

    #[tokio::test]
    async fn filters_by_category_and_search() {
        let (status, body) = send(
            test_router(),
            get_request("/api/knowledge?category=business_development&search=strategy"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["entries"][0]["id"], 1);
        assert_eq!(body["entries"][0]["confidence_score"], 0.95);
    }

    #[tokio::test]
    async fn unparsable_limit_is_failure_envelope() {
        let (status, body) = send(test_router(), get_request("/api/knowledge?limit=lots")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }
}
