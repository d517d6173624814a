//! Outbound adapters for services outside this process: the automation
//! cloud functions, the file-management backend and the local command-line
//! AI tool. Each call is a single attempt; any failure is terminal for the
//! request that triggered it.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

mod automation;
mod file_management;
mod gemini_cli;

pub use automation::{AutomationBridge, AutomationWorkflow};
pub use file_management::FileManagementBridge;
pub use gemini_cli::{GeminiCliBridge, PromptPersona, build_prompt, sanitize_prompt_text};

const MAX_ERROR_DETAIL_CHARS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Automation,
    FileManagement,
    GeminiCli,
}

impl BackendKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::FileManagement => "file_management",
            Self::GeminiCli => "gemini_cli",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{backend} backend is not configured")]
    NotConfigured { backend: BackendKind },
    #[error("{backend} backend unreachable: {message}")]
    Transport {
        backend: BackendKind,
        message: String,
    },
    #[error("{backend} backend returned status {status}")]
    UpstreamStatus { backend: BackendKind, status: u16 },
    #[error("{backend} backend returned an invalid response: {message}")]
    InvalidResponse {
        backend: BackendKind,
        message: String,
    },
    #[error("failed to start command-line AI tool: {0}")]
    Spawn(String),
    #[error("command-line AI tool exited with status {status:?}: {stderr}")]
    ProcessFailed { status: Option<i32>, stderr: String },
    #[error("invalid bridge input: {0}")]
    InvalidInput(String),
}

impl BridgeError {
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::NotConfigured { backend }
            | Self::Transport { backend, .. }
            | Self::UpstreamStatus { backend, .. }
            | Self::InvalidResponse { backend, .. } => *backend,
            Self::Spawn(_) | Self::ProcessFailed { .. } | Self::InvalidInput(_) => {
                BackendKind::GeminiCli
            }
        }
    }
}

/// Sends a prepared request and relays the JSON body of a 2xx reply.
pub(crate) async fn relay_json(
    backend: BackendKind,
    request: reqwest::RequestBuilder,
) -> Result<Value, BridgeError> {
    let response = request
        .send()
        .await
        .map_err(|err| BridgeError::Transport {
            backend,
            message: err.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BridgeError::UpstreamStatus {
            backend,
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| BridgeError::InvalidResponse {
            backend,
            message: format!("failed to read response body: {err}"),
        })?;

    serde_json::from_slice::<Value>(&bytes).map_err(|err| BridgeError::InvalidResponse {
        backend,
        message: format!("response body is not JSON: {err}"),
    })
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub(crate) fn truncate_detail(value: &str) -> String {
    value.trim().chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{BackendKind, BridgeError, join_url, truncate_detail};

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("https://functions.example.test/api/", "/translate"),
            "https://functions.example.test/api/translate"
        );
        assert_eq!(
            join_url("http://127.0.0.1:5000", "file-management/status"),
            "http://127.0.0.1:5000/file-management/status"
        );
    }

    #[test]
    fn errors_report_their_backend() {
        let err = BridgeError::UpstreamStatus {
            backend: BackendKind::FileManagement,
            status: 503,
        };
        assert_eq!(err.backend(), BackendKind::FileManagement);
        assert_eq!(
            err.to_string(),
            "file_management backend returned status 503"
        );
        assert_eq!(
            BridgeError::Spawn("missing".to_string()).backend(),
            BackendKind::GeminiCli
        );
    }

    #[test]
    fn error_detail_is_bounded() {
        assert_eq!(truncate_detail(&"e".repeat(2_000)).len(), 512);
    }
}
