use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::{BridgeError, truncate_detail};
use crate::config::GeminiCliConfig;
use crate::models::{CharacterProfile, CharacterRef, GeminiChatRequest, GeminiChatResponse};
use crate::personas::{self, Language, Persona};

/// Persona fields that flavour the command-line prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPersona {
    pub name: String,
    pub name_ar: String,
    pub specialty: String,
    pub personality: String,
}

impl From<&Persona> for PromptPersona {
    fn from(persona: &Persona) -> Self {
        Self {
            name: persona.name.to_string(),
            name_ar: persona.name_ar.to_string(),
            specialty: persona.specialty.to_string(),
            personality: persona.personality.to_string(),
        }
    }
}

impl From<CharacterProfile> for PromptPersona {
    fn from(profile: CharacterProfile) -> Self {
        Self {
            name: profile.name,
            name_ar: profile.name_ar,
            specialty: profile.specialty,
            personality: profile.personality,
        }
    }
}

impl PromptPersona {
    pub fn from_ref(character: Option<CharacterRef>) -> Self {
        match character {
            Some(CharacterRef::Profile(profile)) => profile.into(),
            Some(CharacterRef::Id(id)) => personas::resolve(Some(id.as_str())).into(),
            None => personas::resolve(None).into(),
        }
    }
}

/// Drops control characters (newline and tab excepted) so user text cannot
/// smuggle NULs or terminal escapes into the argument.
pub fn sanitize_prompt_text(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\n' | '\t'))
        .collect()
}

pub fn build_prompt(persona: &PromptPersona, language: Language, message: &str) -> String {
    format!(
        "You are {} ({}), a {} specialist.\n\
         Your personality: {}\n\
         \n\
         Respond in {} with proper medical terminology and cultural sensitivity.\n\
         Keep responses concise but informative, suitable for voice interaction.\n\
         \n\
         User message: {}",
        sanitize_prompt_text(&persona.name),
        sanitize_prompt_text(&persona.name_ar),
        sanitize_prompt_text(&persona.specialty),
        sanitize_prompt_text(&persona.personality),
        language.display_name(),
        sanitize_prompt_text(message),
    )
}

#[derive(Clone)]
pub struct GeminiCliBridge {
    executable: PathBuf,
}

impl GeminiCliBridge {
    pub fn new(config: GeminiCliConfig) -> Self {
        Self {
            executable: config.executable,
        }
    }

    pub async fn chat(&self, request: GeminiChatRequest) -> Result<GeminiChatResponse, BridgeError> {
        if request.message.trim().is_empty() {
            return Err(BridgeError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let language = request.language.unwrap_or(Language::En);
        let persona = PromptPersona::from_ref(request.character);
        let prompt = build_prompt(&persona, language, &request.message);
        let response = self.complete(&prompt).await?;

        Ok(GeminiChatResponse {
            response,
            character: persona.name,
            language,
        })
    }

    /// Runs the tool with `prompt` as its only argv entry (no shell) and
    /// returns trimmed stdout.
    pub async fn complete(&self, prompt: &str) -> Result<String, BridgeError> {
        debug!(executable = %self.executable.display(), "invoking command-line AI tool");

        let output = Command::new(&self.executable)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| BridgeError::Spawn(err.to_string()))?;

        if !output.status.success() {
            return Err(BridgeError::ProcessFailed {
                status: output.status.code(),
                stderr: truncate_detail(&String::from_utf8_lossy(&output.stderr)),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{GeminiCliBridge, PromptPersona, build_prompt, sanitize_prompt_text};
    use crate::bridge::BridgeError;
    use crate::config::GeminiCliConfig;
    use crate::models::{CharacterProfile, CharacterRef, GeminiChatRequest};
    use crate::personas::Language;

    fn bridge_for(executable: &str) -> GeminiCliBridge {
        GeminiCliBridge::new(GeminiCliConfig {
            executable: PathBuf::from(executable),
        })
    }

    #[test]
    fn prompt_embeds_persona_language_and_message() {
        let persona = PromptPersona::from_ref(Some(CharacterRef::Id("sarah".to_string())));
        let prompt = build_prompt(&persona, Language::Ar, "I have a cough");

        assert!(prompt.starts_with("You are Dr. Sarah (د. سارة), a Modern Medicine & Technology specialist."));
        assert!(prompt.contains("Your personality: modern, tech-savvy, evidence-based approach"));
        assert!(prompt.contains("Respond in Arabic"));
        assert!(prompt.ends_with("User message: I have a cough"));
    }

    #[test]
    fn inline_profile_is_used_verbatim() {
        let persona = PromptPersona::from_ref(Some(CharacterRef::Profile(CharacterProfile {
            name: "Dr. Visitor".to_string(),
            name_ar: "د. زائر".to_string(),
            specialty: "Triage".to_string(),
            personality: "calm".to_string(),
        })));

        assert_eq!(persona.name, "Dr. Visitor");
        assert_eq!(persona.specialty, "Triage");
    }

    #[test]
    fn unknown_or_missing_character_uses_default_persona() {
        assert_eq!(PromptPersona::from_ref(None).name, "Ibn Sina");
        assert_eq!(
            PromptPersona::from_ref(Some(CharacterRef::Id("nobody".to_string()))).name,
            "Ibn Sina"
        );
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(
            sanitize_prompt_text("line one\nline\u{0}two\u{1b}[31m\tend"),
            "line one\nlinetwo[31m\tend"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_metacharacters_reach_the_tool_as_plain_text() {
        let bridge = bridge_for("echo");
        let hostile = "\"; rm -rf / # $(whoami) `id`";

        let output = bridge
            .complete(hostile)
            .await
            .expect("echo should succeed");
        assert_eq!(output, hostile);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn chat_returns_trimmed_stdout_with_persona_name() {
        let bridge = bridge_for("echo");
        let response = bridge
            .chat(GeminiChatRequest {
                message: "hello".to_string(),
                character: Some(CharacterRef::Id("mohamed".to_string())),
                language: None,
            })
            .await
            .expect("chat should succeed");

        assert_eq!(response.character, "Dr. Mohamed");
        assert_eq!(response.language, Language::En);
        assert!(response.response.starts_with("You are Dr. Mohamed"));
        assert!(response.response.ends_with("User message: hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_process_failure() {
        let err = bridge_for("false")
            .complete("anything")
            .await
            .expect_err("false exits non-zero");
        assert!(matches!(err, BridgeError::ProcessFailed { status: Some(1), .. }));
    }

    #[tokio::test]
    async fn missing_executable_is_spawn_failure() {
        let err = bridge_for("/nonexistent/bin/gemini-cli")
            .complete("anything")
            .await
            .expect_err("missing binary should fail");
        assert!(matches!(err, BridgeError::Spawn(_)));
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let err = bridge_for("echo")
            .chat(GeminiChatRequest {
                message: "  ".to_string(),
                character: None,
                language: Some(Language::Ar),
            })
            .await
            .expect_err("blank message should fail");
        assert!(matches!(err, BridgeError::InvalidInput(_)));
    }
}
