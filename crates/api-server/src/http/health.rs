use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::bridge::BackendKind;
use shared::models::{OkResponse, ReadinessResponse};

use super::AppState;

pub(super) async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(OkResponse { ok: true }))
}

/// Canned routes never depend on upstreams, so the server is always ready;
/// `backends` reports which proxied paths are configured.
pub(super) async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let backends = BTreeMap::from([
        (
            BackendKind::Automation.to_string(),
            state.automation.is_configured(),
        ),
        (
            BackendKind::FileManagement.to_string(),
            state.file_management.is_configured(),
        ),
        (BackendKind::GeminiCli.to_string(), true),
    ]);

    (
        StatusCode::OK,
        Json(ReadinessResponse { ok: true, backends }),
    )
}
