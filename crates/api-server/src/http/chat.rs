use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::dispatch::dispatch_body;
use tracing::warn;

use super::AppState;
use super::errors::{CHAT_FAILED, failure_response};

pub(super) async fn ai_chat(State(state): State<AppState>, body: Bytes) -> Response {
    match dispatch_body(&body, &state.default_user_id, Utc::now()) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            warn!("ai chat request failed: {err}");
            failure_response(CHAT_FAILED)
        }
    }
}
