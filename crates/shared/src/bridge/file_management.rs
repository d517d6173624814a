use serde_json::Value;

use super::{BackendKind, BridgeError, join_url, relay_json};
use crate::config::FileManagementBackendConfig;
use crate::models::FileManagementRequest;

const FILE_MANAGEMENT_PATH: &str = "file-management";
const FILE_MANAGEMENT_STATUS_PATH: &str = "file-management/status";

#[derive(Clone)]
pub struct FileManagementBridge {
    config: FileManagementBackendConfig,
    http_client: reqwest::Client,
}

impl FileManagementBridge {
    pub fn new(config: FileManagementBackendConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.base_url.is_some()
    }

    pub async fn run(&self, request: &FileManagementRequest) -> Result<Value, BridgeError> {
        let base_url = self.base_url()?;
        relay_json(
            BackendKind::FileManagement,
            self.http_client
                .post(join_url(base_url, FILE_MANAGEMENT_PATH))
                .json(request),
        )
        .await
    }

    pub async fn status(&self) -> Result<Value, BridgeError> {
        let base_url = self.base_url()?;
        relay_json(
            BackendKind::FileManagement,
            self.http_client
                .get(join_url(base_url, FILE_MANAGEMENT_STATUS_PATH)),
        )
        .await
    }

    fn base_url(&self) -> Result<&str, BridgeError> {
        self.config
            .base_url
            .as_deref()
            .ok_or(BridgeError::NotConfigured {
                backend: BackendKind::FileManagement,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::FileManagementBridge;
    use crate::bridge::BridgeError;
    use crate::config::FileManagementBackendConfig;

    #[tokio::test]
    async fn unconfigured_status_fails_without_io() {
        let bridge =
            FileManagementBridge::new(FileManagementBackendConfig::default(), reqwest::Client::new());

        let err = bridge.status().await.expect_err("should fail");
        assert!(matches!(err, BridgeError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let bridge = FileManagementBridge::new(
            FileManagementBackendConfig {
                base_url: Some("http://127.0.0.1:9".to_string()),
            },
            reqwest::Client::new(),
        );

        let err = bridge.status().await.expect_err("nothing listens on port 9");
        assert!(matches!(err, BridgeError::Transport { .. }));
    }
}
