use serde_json::Value;
use tracing::debug;

use super::{BackendKind, BridgeError, join_url, relay_json};
use crate::config::AutomationBackendConfig;
use crate::models::TranslateRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationWorkflow {
    Translate,
    GenerateProposal,
    ProcessEmail,
    CategorizeEvent,
    CharacterChat,
    SheetsAutomation,
}

impl AutomationWorkflow {
    pub const ALL: [AutomationWorkflow; 6] = [
        Self::Translate,
        Self::GenerateProposal,
        Self::ProcessEmail,
        Self::CategorizeEvent,
        Self::CharacterChat,
        Self::SheetsAutomation,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::GenerateProposal => "generate-proposal",
            Self::ProcessEmail => "process-email",
            Self::CategorizeEvent => "categorize-event",
            Self::CharacterChat => "character-chat",
            Self::SheetsAutomation => "sheets-automation",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|workflow| workflow.slug() == slug)
    }

    /// Message returned to callers when this workflow fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Translate => "Translation failed",
            Self::GenerateProposal => "Proposal generation failed",
            Self::ProcessEmail => "Email processing failed",
            Self::CategorizeEvent => "Event categorization failed",
            Self::CharacterChat => "Character chat failed",
            Self::SheetsAutomation => "Sheets automation failed",
        }
    }
}

#[derive(Clone)]
pub struct AutomationBridge {
    config: AutomationBackendConfig,
    http_client: reqwest::Client,
}

impl AutomationBridge {
    pub fn new(config: AutomationBackendConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.base_url.is_some() && self.config.auth_token.is_some()
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<Value, BridgeError> {
        let payload = serde_json::to_value(request)
            .map_err(|err| BridgeError::InvalidInput(err.to_string()))?;
        self.forward(AutomationWorkflow::Translate, &payload).await
    }

    /// POSTs `payload` to the workflow path with bearer auth and relays the
    /// JSON reply unchanged.
    pub async fn forward(
        &self,
        workflow: AutomationWorkflow,
        payload: &Value,
    ) -> Result<Value, BridgeError> {
        let (Some(base_url), Some(auth_token)) = (
            self.config.base_url.as_deref(),
            self.config.auth_token.as_deref(),
        ) else {
            return Err(BridgeError::NotConfigured {
                backend: BackendKind::Automation,
            });
        };

        let url = join_url(base_url, workflow.slug());
        debug!(workflow = workflow.slug(), "forwarding automation request");

        relay_json(
            BackendKind::Automation,
            self.http_client
                .post(url)
                .bearer_auth(auth_token)
                .json(payload),
        )
        .await
    }
}
