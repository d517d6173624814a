use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config_env::{EnvLookup, optional_trimmed, parse_base_url};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_GEMINI_CLI_PATH: &str = "gemini";
pub const DEFAULT_USER_ID: &str = "mayo";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub default_user_id: String,
    pub automation: AutomationBackendConfig,
    pub file_management: FileManagementBackendConfig,
    pub gemini_cli: GeminiCliConfig,
}

/// Cloud-function backend serving translation, proposals and the other
/// no-code automation workflows.
#[derive(Debug, Clone, Default)]
pub struct AutomationBackendConfig {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FileManagementBackendConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiCliConfig {
    pub executable: PathBuf,
}

impl Default for GeminiCliConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_GEMINI_CLI_PATH),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, ConfigError> {
        let raw_bind_addr = optional_trimmed(lookup, "API_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_bind_addr.parse::<SocketAddr>().map_err(|_| {
            ConfigError::InvalidConfiguration(format!(
                "API_BIND_ADDR is not a socket address: '{raw_bind_addr}'"
            ))
        })?;

        Ok(Self {
            bind_addr,
            default_user_id: optional_trimmed(lookup, "DEFAULT_USER_ID")
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            automation: AutomationBackendConfig {
                base_url: parse_base_url(lookup, "FIREBASE_FUNCTIONS_URL")?,
                auth_token: optional_trimmed(lookup, "FIREBASE_AUTH_TOKEN"),
            },
            file_management: FileManagementBackendConfig {
                base_url: parse_base_url(lookup, "PYTHON_BACKEND_URL")?,
            },
            gemini_cli: GeminiCliConfig {
                executable: optional_trimmed(lookup, "GEMINI_CLI_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_GEMINI_CLI_PATH)),
            },
        })
    }
}

/// Loads `.env` from the working directory (or a parent) when one exists.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}
