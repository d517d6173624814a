use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    ActionKind, ChatRequest, ChatResponse, ConnectionsResponse, FailureEnvelope,
    GeminiChatRequest, GeminiChatResponse, KnowledgeQuery, KnowledgeResponse, MemoryListResponse,
    SendToPeerRequest, SendToPeerResponse, StoreMemoryRequest, StoreMemoryResponse,
};
use crate::personas::PersonaId;
use crate::server_memory::DEFAULT_MEMORY_TYPE;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("assistant server unreachable: {0}")]
    Transport(String),
    #[error("assistant server returned status {status}: {error}")]
    Upstream { status: u16, error: String },
    #[error("assistant server returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Typed client for the assistant HTTP surface, rooted at e.g.
/// `http://127.0.0.1:8080/api`.
#[derive(Clone)]
pub struct AssistantClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl AssistantClient {
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        self.post_json("ai-chat", request).await
    }

    pub async fn get_memories(
        &self,
        session_id: &str,
        memory_type: Option<&str>,
    ) -> Result<MemoryListResponse, ClientError> {
        let request = self.http_client.get(self.url("memory")).query(&[
            ("sessionId", session_id),
            ("type", memory_type.unwrap_or(DEFAULT_MEMORY_TYPE)),
        ]);
        send(request).await
    }

    pub async fn store_memory(
        &self,
        request: &StoreMemoryRequest,
    ) -> Result<StoreMemoryResponse, ClientError> {
        self.post_json("memory", request).await
    }

    pub async fn search_knowledge(
        &self,
        query: &KnowledgeQuery,
    ) -> Result<KnowledgeResponse, ClientError> {
        send(self.http_client.get(self.url("knowledge")).query(query)).await
    }

    pub async fn get_connections(&self) -> Result<ConnectionsResponse, ClientError> {
        send(self.http_client.get(self.url("connections"))).await
    }

    pub async fn send_to_team_member(
        &self,
        peer_uri: &str,
        message: &str,
    ) -> Result<SendToPeerResponse, ClientError> {
        let request = SendToPeerRequest {
            peer_uri: peer_uri.to_string(),
            message: message.to_string(),
        };
        self.post_json("connections", &request).await
    }

    pub async fn search_web(&self, query: &str) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest::new(format!("Search the web for: {query}"))
            .with_character(PersonaId::ResearchScientist.as_str())
            .with_action(ActionKind::WebSearch);
        self.chat(&request).await
    }

    pub async fn analyze_data(
        &self,
        data_description: &str,
        analysis_type: Option<&str>,
    ) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest::new(format!("Analyze this data: {data_description}"))
            .with_character(PersonaId::ResearchScientist.as_str())
            .with_action(ActionKind::AnalyzeData)
            .with_param(
                "analysisType",
                analysis_type.unwrap_or(crate::synthesizer::DEFAULT_ANALYSIS_TYPE),
            );
        self.chat(&request).await
    }

    pub async fn process_file(
        &self,
        file_path: &str,
        task: &str,
    ) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest::new(format!("Process file: {file_path} with task: {task}"))
            .with_character(PersonaId::ResearchScientist.as_str())
            .with_action(ActionKind::ProcessFile)
            .with_param("filePath", file_path)
            .with_param("task", task);
        self.chat(&request).await
    }

    pub async fn gemini_chat(
        &self,
        request: &GeminiChatRequest,
    ) -> Result<GeminiChatResponse, ClientError> {
        self.post_json("gemini-chat", request).await
    }

    async fn post_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, ClientError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        send(self.http_client.post(self.url(path)).json(payload)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn send<Res: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<Res, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|err| ClientError::Transport(err.to_string()))?;

    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ClientError::InvalidResponse(format!("failed to read body: {err}")))?;

    if (200..300).contains(&status) {
        return serde_json::from_slice::<Res>(&bytes)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()));
    }

    let error = serde_json::from_slice::<FailureEnvelope>(&bytes)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
    Err(ClientError::Upstream { status, error })
}
