use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::{generate_session_id, iso_timestamp};
use crate::local_responder::{self, LocalReply, Mood, Topic};
use crate::models::{ActionKind, ChatRequest, ChatResponse};
use crate::personas::{self, DEFAULT_PERSONA, Language, Persona, PersonaId};

pub const APOLOGY_AR: &str = "عذراً، حدث خطأ في الاتصال.";
pub const APOLOGY_EN: &str = "Sorry, there was a connection error.";

pub fn connection_apology(language: Language) -> &'static str {
    match language {
        Language::Ar => APOLOGY_AR,
        Language::En => APOLOGY_EN,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMessage {
    pub sender: Sender,
    pub text: String,
    pub persona: PersonaId,
    pub timestamp: String,
}

/// Hand-off summary of a session, sent to a clinician or family contact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub timestamp: String,
    pub session_id: String,
    pub interactions: Vec<SessionMessage>,
    pub contact_method: Option<String>,
    pub summary: String,
    pub character: String,
}

impl SessionReport {
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// State owned by one chat surface. Every change goes through a transition
/// method; nothing else mutates it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    persona: PersonaId,
    language: Language,
    session_id: Option<String>,
    user_id: Option<String>,
    messages: Vec<SessionMessage>,
    speaking: bool,
    listening: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA, Language::Ar)
    }
}

impl ChatSession {
    pub fn new(persona: PersonaId, language: Language) -> Self {
        Self {
            persona,
            language,
            session_id: None,
            user_id: None,
            messages: Vec::new(),
            speaking: false,
            listening: false,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn persona(&self) -> &'static Persona {
        personas::persona(self.persona)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Switches persona and returns its localized greeting. The greeting is
    /// spoken, so the session enters the speaking state.
    pub fn select_persona(&mut self, persona: PersonaId) -> String {
        self.persona = persona;
        self.speaking = true;
        self.persona().introduction(self.language)
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_speaking(&mut self, speaking: bool) {
        self.speaking = speaking;
    }

    /// Listening and speaking are exclusive.
    pub fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
        if listening {
            self.speaking = false;
        }
    }

    pub fn append_message(&mut self, sender: Sender, text: impl Into<String>, now: DateTime<Utc>) {
        self.messages.push(SessionMessage {
            sender,
            text: text.into(),
            persona: self.persona,
            timestamp: iso_timestamp(now),
        });
    }

    /// Records the user's turn and returns the request envelope for it.
    pub fn build_request(
        &mut self,
        message: &str,
        action: Option<ActionKind>,
        now: DateTime<Utc>,
    ) -> ChatRequest {
        self.append_message(Sender::User, message, now);
        self.listening = false;

        let mut request = ChatRequest::new(message).with_character(self.persona.as_str());
        if let Some(session_id) = &self.session_id {
            request = request.with_session_id(session_id.clone());
        }
        if let Some(user_id) = &self.user_id {
            request = request.with_user_id(user_id.clone());
        }
        if let Some(action) = action {
            request = request.with_action(action);
        }
        request
    }

    /// Appends the assistant turn. A missing or blank reply becomes the
    /// localized apology; raw error detail never reaches the transcript.
    pub fn record_response(&mut self, response: Option<&ChatResponse>, now: DateTime<Utc>) -> &str {
        let reply = response
            .filter(|response| response.success)
            .map(|response| response.response.trim())
            .filter(|text| !text.is_empty());

        let text = match reply {
            Some(text) => text.to_string(),
            None => connection_apology(self.language).to_string(),
        };
        if self.session_id.is_none() {
            self.session_id = response
                .map(|response| response.session_id.clone())
                .filter(|session_id| !session_id.is_empty());
        }

        self.append_message(Sender::Assistant, text, now);
        self.speaking = true;
        self.messages
            .last()
            .map(|message| message.text.as_str())
            .unwrap_or_default()
    }

    /// Answers a turn without the assistant server, recording both sides.
    pub fn respond_locally(&mut self, message: &str, now: DateTime<Utc>) -> LocalReply {
        self.append_message(Sender::User, message, now);
        self.listening = false;

        let reply = local_responder::reply(self.persona, self.language, message);
        self.append_message(Sender::Assistant, reply.text.clone(), now);
        self.speaking = true;
        reply
    }

    pub fn report(&self, contact_method: Option<&str>, now: DateTime<Utc>) -> SessionReport {
        let persona = self.persona();
        SessionReport {
            timestamp: iso_timestamp(now),
            session_id: self
                .session_id
                .clone()
                .unwrap_or_else(generate_session_id),
            interactions: self.messages.clone(),
            contact_method: contact_method
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string),
            summary: self.summary(),
            character: format!("{} - {}", persona.name, persona.title),
        }
    }

    fn summary(&self) -> String {
        let mut topics: Vec<&'static str> = Vec::new();
        for message in self.messages.iter().filter(|m| m.sender == Sender::User) {
            let topic = match local_responder::classify_topic(&message.text) {
                Topic::Health => Some("health"),
                Topic::Wisdom => Some("wisdom"),
                Topic::Greeting | Topic::General => None,
            };
            let guidance = (local_responder::classify_mood(&message.text) == Mood::Compassionate)
                .then_some("guidance");
            for label in topic.into_iter().chain(guidance) {
                if !topics.contains(&label) {
                    topics.push(label);
                }
            }
        }

        let topics = if topics.is_empty() {
            "general".to_string()
        } else {
            topics.join(", ")
        };
        format!(
            "Session with {} interactions. Topics discussed: {topics}.",
            self.messages.len()
        )
    }
}
