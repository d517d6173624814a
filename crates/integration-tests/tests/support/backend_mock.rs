#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

pub struct MockBackendServer {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

#[derive(Clone)]
struct MockState {
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    reply: Bytes,
}

impl MockBackendServer {
    /// Answers every request with `status` and `reply`, recording what it saw.
    pub async fn start(status: StatusCode, reply: &str) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            recorded: recorded.clone(),
            status,
            reply: Bytes::from(reply.to_string()),
        };
        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock backend listener should bind");
        let bind_addr = listener
            .local_addr()
            .expect("mock backend listener local address should exist");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock backend server should run");
        });

        Self {
            base_url: format!("http://{bind_addr}"),
            recorded,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded
            .lock()
            .expect("recorded requests lock should not be poisoned")
            .clone()
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_reply(
    State(state): State<MockState>,
    method: axum::http::Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state
        .recorded
        .lock()
        .expect("recorded requests lock should not be poisoned")
        .push(recorded);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.clone(),
    )
        .into_response()
}
