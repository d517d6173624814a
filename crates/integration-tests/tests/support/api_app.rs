#![allow(dead_code)]

use api_server::http::{AppState, build_router};
use shared::config::ApiConfig;

pub const TEST_AUTOMATION_TOKEN: &str = "integration-test-token";

#[derive(Default)]
pub struct TestBackends<'a> {
    pub automation_url: Option<&'a str>,
    pub file_management_url: Option<&'a str>,
    pub gemini_cli: Option<&'a str>,
}

pub fn build_test_router(backends: TestBackends<'_>) -> axum::Router {
    let lookup = |key: &str| match key {
        "FIREBASE_FUNCTIONS_URL" => backends.automation_url.map(ToString::to_string),
        "FIREBASE_AUTH_TOKEN" => backends
            .automation_url
            .map(|_| TEST_AUTOMATION_TOKEN.to_string()),
        "PYTHON_BACKEND_URL" => backends.file_management_url.map(ToString::to_string),
        "GEMINI_CLI_PATH" => backends.gemini_cli.map(ToString::to_string),
        _ => None,
    };
    let config = ApiConfig::from_lookup(&lookup).expect("test config should parse");

    build_router(AppState::from_config(&config, reqwest::Client::new()))
}

/// The router served on an ephemeral port, for tests that go through the
/// typed HTTP client.
pub struct ServedApi {
    pub api_base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl ServedApi {
    pub async fn start(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("api listener should bind");
        let bind_addr = listener
            .local_addr()
            .expect("api listener local address should exist");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("api server should run");
        });

        Self {
            api_base_url: format!("http://{bind_addr}/api"),
            handle,
        }
    }
}

impl Drop for ServedApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
