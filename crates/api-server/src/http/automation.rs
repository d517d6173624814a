use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use shared::bridge::AutomationWorkflow;
use shared::models::TranslateRequest;
use tracing::warn;

use super::errors::{UNKNOWN_WORKFLOW, bridge_error_response, failure_response};
use super::{AppState, decode_json_body};

pub(super) async fn run_workflow(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Bytes,
) -> Response {
    let Some(workflow) = AutomationWorkflow::from_slug(&slug) else {
        warn!(workflow = %slug, "unknown automation workflow requested");
        return failure_response(UNKNOWN_WORKFLOW);
    };
    let failure_message = workflow.failure_message();

    let result = match workflow {
        AutomationWorkflow::Translate => {
            match decode_json_body::<TranslateRequest>(&body, failure_message) {
                Ok(request) => state.automation.translate(&request).await,
                Err(response) => return response,
            }
        }
        _ => match decode_json_body::<Value>(&body, failure_message) {
            Ok(payload) => state.automation.forward(workflow, &payload).await,
            Err(response) => return response,
        },
    };

    match result {
        Ok(upstream) => (StatusCode::OK, Json(upstream)).into_response(),
        Err(err) => bridge_error_response(&err, failure_message),
    }
}
