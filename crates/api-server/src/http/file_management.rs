use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::FileManagementRequest;

use super::errors::{FILE_MANAGEMENT_FAILED, FILE_MANAGEMENT_STATUS_FAILED, bridge_error_response};
use super::{AppState, decode_json_body};

pub(super) async fn run(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match decode_json_body::<FileManagementRequest>(&body, FILE_MANAGEMENT_FAILED) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.file_management.run(&request).await {
        Ok(upstream) => (StatusCode::OK, Json(upstream)).into_response(),
        Err(err) => bridge_error_response(&err, FILE_MANAGEMENT_FAILED),
    }
}

pub(super) async fn status(State(state): State<AppState>) -> Response {
    match state.file_management.status().await {
        Ok(upstream) => (StatusCode::OK, Json(upstream)).into_response(),
        Err(err) => bridge_error_response(&err, FILE_MANAGEMENT_STATUS_FAILED),
    }
}
