use axum::body::Bytes;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Router, middleware};
use serde::de::DeserializeOwned;
use shared::bridge::{AutomationBridge, FileManagementBridge, GeminiCliBridge};
use shared::config::ApiConfig;
use tracing::warn;

mod automation;
mod chat;
mod connections;
mod errors;
mod file_management;
mod gemini;
mod health;
mod knowledge;
mod memory;
mod observability;
mod personas;
#[cfg(test)]
mod test_support;

#[derive(Clone)]
pub struct AppState {
    pub default_user_id: String,
    pub automation: AutomationBridge,
    pub file_management: FileManagementBridge,
    pub gemini_cli: GeminiCliBridge,
}

impl AppState {
    pub fn from_config(config: &ApiConfig, http_client: reqwest::Client) -> Self {
        Self {
            default_user_id: config.default_user_id.clone(),
            automation: AutomationBridge::new(config.automation.clone(), http_client.clone()),
            file_management: FileManagementBridge::new(
                config.file_management.clone(),
                http_client,
            ),
            gemini_cli: GeminiCliBridge::new(config.gemini_cli.clone()),
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ai-chat", post(chat::ai_chat))
        .route(
            "/connections",
            get(connections::list_connections).post(connections::send_to_peer),
        )
        .route("/knowledge", get(knowledge::search_knowledge))
        .route(
            "/memory",
            get(memory::list_memories).post(memory::store_memory),
        )
        .route("/automation/{workflow}", post(automation::run_workflow))
        .route("/file-management", post(file_management::run))
        .route("/file-management/status", get(file_management::status))
        .route("/gemini-chat", post(gemini::gemini_chat))
        .route("/personas", get(personas::list_personas));

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(
            observability::request_observability_middleware,
        ))
        .with_state(app_state)
}

/// Decodes a JSON body by hand so malformed input maps to the route's
/// failure envelope instead of an extractor rejection.
pub(super) fn decode_json_body<T: DeserializeOwned>(
    body: &Bytes,
    failure_message: &str,
) -> Result<T, Response> {
    serde_json::from_slice::<T>(body).map_err(|err| {
        warn!("rejecting malformed request body: {err}");
        errors::failure_response(failure_message)
    })
}
