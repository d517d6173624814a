use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::ids::{generate_message_id, generate_session_id, iso_timestamp};
use crate::models::{ActionKind, ChatRequest, ChatResponse};
use crate::personas::{DEFAULT_PERSONA, PersonaId};
use crate::synthesizer::synthesize;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed chat request: {0}")]
    MalformedRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    /// Set when a non-empty but unrecognised action was replaced by chat.
    pub fell_back: bool,
}

pub fn resolve_action(raw: Option<&str>) -> ResolvedAction {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return ResolvedAction {
            kind: ActionKind::Chat,
            fell_back: false,
        };
    };

    match ActionKind::parse(raw) {
        Some(kind) => ResolvedAction {
            kind,
            fell_back: false,
        },
        None => {
            warn!(requested_action = %raw, "unknown chat action; falling back to chat");
            ResolvedAction {
                kind: ActionKind::Chat,
                fell_back: true,
            }
        }
    }
}

/// Parses a raw request body and dispatches it.
pub fn dispatch_body(
    body: &[u8],
    default_user_id: &str,
    now: DateTime<Utc>,
) -> Result<ChatResponse, DispatchError> {
    let request = serde_json::from_slice::<ChatRequest>(body)
        .map_err(|err| DispatchError::MalformedRequest(err.to_string()))?;
    Ok(dispatch(&request, default_user_id, now))
}

pub fn dispatch(request: &ChatRequest, default_user_id: &str, now: DateTime<Utc>) -> ChatResponse {
    let action = resolve_action(request.action.as_deref());
    let character = request
        .character
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_PERSONA.as_str())
        .to_string();
    let persona = PersonaId::resolve(Some(character.as_str()));
    let synthesis = synthesize(action.kind, persona, request);

    let session_id = request
        .session_id
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_session_id);
    let user_id = request
        .user_id
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default_user_id)
        .to_string();

    ChatResponse {
        success: true,
        response: synthesis.text,
        session_id,
        message_id: generate_message_id(),
        timestamp: iso_timestamp(now),
        system: format!("Gemini CLI - {character}"),
        character,
        user_id,
        tokens_used: action.kind.tokens_used(),
        resolved_action: action.kind,
        action_fallback: action.fell_back,
        details: synthesis.details,
    }
}
