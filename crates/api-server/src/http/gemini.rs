use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::GeminiChatRequest;

use super::errors::{GEMINI_CHAT_FAILED, bridge_error_response};
use super::{AppState, decode_json_body};

pub(super) async fn gemini_chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match decode_json_body::<GeminiChatRequest>(&body, GEMINI_CHAT_FAILED) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.gemini_cli.chat(request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => bridge_error_response(&err, GEMINI_CHAT_FAILED),
    }
}
