use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::personas::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Chat,
    WebSearch,
    AnalyzeData,
    ProcessFile,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::WebSearch => "web_search",
            Self::AnalyzeData => "analyze_data",
            Self::ProcessFile => "process_file",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "chat" => Some(Self::Chat),
            "web_search" => Some(Self::WebSearch),
            "analyze_data" => Some(Self::AnalyzeData),
            "process_file" => Some(Self::ProcessFile),
            _ => None,
        }
    }

    /// Cosmetic per-branch usage figure reported in `tokens_used`.
    pub const fn tokens_used(self) -> u32 {
        match self {
            Self::Chat => 150,
            Self::WebSearch => 120,
            Self::AnalyzeData => 200,
            Self::ProcessFile => 180,
        }
    }
}

/// Inbound envelope for `POST /api/ai-chat`. Everything the client sends
/// beyond the named fields lands in `params`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "message_text")]
    pub message: String,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub character: Option<String>,
    #[serde(
        default,
        rename = "sessionId",
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
    #[serde(
        default,
        rename = "userId",
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_action(mut self, action: ActionKind) -> Self {
        self.action = Some(action.as_str().to_string());
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Non-empty string parameter, if present.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Envelope fields of any other JSON type count as absent, so a parsable
/// body always reaches the dispatcher.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// `null` becomes empty text; other scalars keep their JSON rendering.
fn message_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value,
        Some(other) => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionDetails {
    ProcessFile { file_path: String, task: String },
    AnalyzeData { analysis_type: String },
    WebSearch { source: String },
    Chat { model: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub session_id: String,
    pub message_id: String,
    pub timestamp: String,
    pub system: String,
    pub character: String,
    pub user_id: String,
    pub tokens_used: u32,
    pub resolved_action: ActionKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub action_fallback: bool,
    #[serde(flatten)]
    pub details: ActionDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
}

impl FailureEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConnection {
    pub status: PeerStatus,
    pub last_activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    pub success: bool,
    pub connections: BTreeMap<String, PeerConnection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendToPeerRequest {
    #[serde(default)]
    pub peer_uri: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendToPeerResponse {
    pub success: bool,
    pub peer_uri: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: u32,
    pub category: String,
    pub title: String,
    pub content: String,
    pub confidence_score: f64,
    pub tags: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeResponse {
    pub success: bool,
    pub entries: Vec<KnowledgeEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryQuery {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default, rename = "type")]
    pub memory_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMemoryRecord {
    pub id: i64,
    pub session_id: Option<String>,
    pub context_type: String,
    pub memory_type: String,
    pub content: String,
    pub timestamp: String,
    pub importance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryListResponse {
    pub success: bool,
    pub memories: Vec<ServerMemoryRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreMemoryRequest {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default, rename = "contextType")]
    pub context_type: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMemory {
    pub id: i64,
    pub session_id: Option<String>,
    pub context_type: Option<String>,
    pub content: String,
    pub metadata: Option<Value>,
    pub timestamp: String,
    pub stored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMemoryResponse {
    pub success: bool,
    pub memory: StoredMemory,
}

/// Persona reference accepted by the command-line AI route: either a
/// registry id or an inline profile built by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterRef {
    Id(String),
    Profile(CharacterProfile),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    #[serde(rename = "nameAr", default)]
    pub name_ar: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub personality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiChatRequest {
    pub message: String,
    #[serde(default)]
    pub character: Option<CharacterRef>,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiChatResponse {
    pub response: String,
    pub character: String,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(rename = "targetLanguages")]
    pub target_languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManagementRequest {
    pub action: String,
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ok: bool,
    pub backends: BTreeMap<String, bool>,
}
