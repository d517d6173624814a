use std::path::PathBuf;

use chrono::{DateTime, Utc};
use shared::chat_session::ChatSession;
use shared::client::AssistantClient;
use shared::companion_store::{
    CompanionStore, CompanionStoreError, FileStorage, MemoryType, export_file_name,
};
use shared::models::ActionKind;
use shared::personas::{self, Language};
use thiserror::Error;

use crate::cli::{CliOptions, Command};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] CompanionStoreError),
    #[error("failed to write export file {path}: {message}")]
    Export { path: PathBuf, message: String },
    #[error("failed to render session report: {0}")]
    Report(String),
}

/// Result of one invocation: text for stdout and whether it counts as a
/// failure for the exit status.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub failed: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            failed: false,
        }
    }
}

pub async fn run(options: &CliOptions, now: DateTime<Utc>) -> Result<Outcome, RunError> {
    let store = CompanionStore::new(FileStorage::new(&options.data_dir));

    match &options.command {
        Command::Chat {
            message,
            action,
            remember,
            offline,
            report,
            contact,
        } => {
            let mut session = ChatSession::new(options.persona, options.language);
            if let Some(user_id) = &options.user_id {
                session = session.with_user_id(user_id.clone());
            }

            let (reply, failed) = if *offline {
                (session.respond_locally(message, now).text, false)
            } else {
                let client = AssistantClient::new(&options.server_url, reqwest::Client::new());
                chat_once(&client, &mut session, message, *action, now).await
            };
            if *remember && !failed {
                store.add_memory(
                    &format!("{message}\n{reply}"),
                    MemoryType::Conversation,
                    now,
                )?;
            }

            let mut output = reply;
            if *report {
                let document = session
                    .report(contact.as_deref(), now)
                    .to_pretty_json()
                    .map_err(|err| RunError::Report(err.to_string()))?;
                output.push_str("\n\n");
                output.push_str(&document);
            }
            Ok(Outcome { output, failed })
        }
        Command::Personas => {
            let mut output = String::new();
            for persona in personas::all() {
                let specialty = match options.language {
                    Language::Ar => persona.specialty_ar,
                    Language::En => persona.specialty,
                };
                output.push_str(&format!(
                    "{:<20} {} - {} [{}]\n",
                    persona.id.as_str(),
                    persona.display_name(options.language),
                    specialty,
                    persona.speech_locale()
                ));
            }
            Ok(Outcome::ok(output))
        }
        Command::MemoryAdd {
            content,
            memory_type,
        } => {
            let record = store.add_memory(content, *memory_type, now)?;
            Ok(Outcome::ok(format!("added memory {}", record.id)))
        }
        Command::MemoryList { search } => {
            let mut output = String::new();
            for memory in store.list_memories(search)? {
                output.push_str(&format!(
                    "{}  [{}] {}  {}\n",
                    memory.id,
                    memory.memory_type.as_str(),
                    memory.timestamp,
                    memory.content
                ));
            }
            Ok(Outcome::ok(output))
        }
        Command::MemoryRemove { id } => {
            if store.remove_memory(id)? {
                Ok(Outcome::ok(format!("removed memory {id}")))
            } else {
                Ok(Outcome {
                    output: format!("no memory with id {id}"),
                    failed: true,
                })
            }
        }
        Command::MemoryExport { out } => {
            let document = store.export_all(now)?.to_pretty_json()?;
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(export_file_name(now)));
            std::fs::write(&path, document).map_err(|err| RunError::Export {
                path: path.clone(),
                message: err.to_string(),
            })?;
            Ok(Outcome::ok(format!("exported to {}", path.display())))
        }
        Command::TaskAdd { title, priority } => {
            let task = store.add_task(title, *priority, now)?;
            Ok(Outcome::ok(format!("added task {}", task.id)))
        }
        Command::TaskList => {
            let mut output = String::new();
            for task in store.tasks()? {
                let mark = if task.completed { "x" } else { " " };
                output.push_str(&format!(
                    "[{mark}] {}  ({}) {}\n",
                    task.id,
                    task.priority.as_str(),
                    task.title
                ));
            }
            Ok(Outcome::ok(output))
        }
        Command::TaskToggle { id } => {
            let task = store.toggle_task(id)?;
            let state = if task.completed { "done" } else { "open" };
            Ok(Outcome::ok(format!("task {} is {state}", task.id)))
        }
        Command::IntegrationList => {
            let mut output = String::new();
            for integration in store.integrations()? {
                let state = if integration.connected {
                    "Online"
                } else {
                    "Offline"
                };
                output.push_str(&format!("{:<14} {state}\n", integration.name));
            }
            Ok(Outcome::ok(output))
        }
        Command::IntegrationSet { name, connected } => {
            let integration = store.set_integration_connected(name, *connected, now)?;
            let state = if integration.connected {
                "connected"
            } else {
                "disconnected"
            };
            Ok(Outcome::ok(format!("{} {state}", integration.name)))
        }
    }
}

/// One chat turn. Transport and server failures collapse into the
/// session's localized apology; the detail goes to stderr only.
async fn chat_once(
    client: &AssistantClient,
    session: &mut ChatSession,
    message: &str,
    action: Option<ActionKind>,
    now: DateTime<Utc>,
) -> (String, bool) {
    let request = session.build_request(message, action, now);
    let response = match client.chat(&request).await {
        Ok(response) => Some(response),
        Err(err) => {
            eprintln!("chat request failed: {err}");
            None
        }
    };
    let failed = response.is_none();
    let reply = session.record_response(response.as_ref(), now).to_string();
    (reply, failed)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shared::chat_session::APOLOGY_EN;
    use shared::companion_store::{CompanionExport, MemoryType, TaskPriority};
    use shared::personas::{Language, PersonaId};

    use super::run;
    use crate::cli::{CliOptions, Command};

    fn options(dir: &std::path::Path, command: Command) -> CliOptions {
        CliOptions {
            server_url: "http://127.0.0.1:9/api".to_string(),
            data_dir: dir.to_path_buf(),
            language: Language::En,
            persona: PersonaId::IbnSina,
            user_id: None,
            command,
        }
    }

    #[tokio::test]
    async fn memory_commands_share_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        run(
            &options(
                dir.path(),
                Command::MemoryAdd {
                    content: "Patient follow-up notes".to_string(),
                    memory_type: MemoryType::Document,
                },
            ),
            Utc::now(),
        )
        .await
        .expect("add");

        let listed = run(
            &options(
                dir.path(),
                Command::MemoryList {
                    search: "follow".to_string(),
                },
            ),
            Utc::now(),
        )
        .await
        .expect("list");
        assert!(listed.output.contains("[document]"));
        assert!(listed.output.contains("Patient follow-up notes"));

        let out = dir.path().join("export.json");
        run(
            &options(
                dir.path(),
                Command::MemoryExport {
                    out: Some(out.clone()),
                },
            ),
            Utc::now(),
        )
        .await
        .expect("export");
        let exported: CompanionExport =
            serde_json::from_str(&std::fs::read_to_string(out).expect("read export"))
                .expect("parse export");
        assert_eq!(exported.memories.len(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_memory_is_a_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = run(
            &options(
                dir.path(),
                Command::MemoryRemove {
                    id: "missing".to_string(),
                },
            ),
            Utc::now(),
        )
        .await
        .expect("run");
        assert!(outcome.failed);
    }

    #[tokio::test]
    async fn tasks_toggle_through_commands() {
        let dir = tempfile::tempdir().expect("tempdir");
        let added = run(
            &options(
                dir.path(),
                Command::TaskAdd {
                    title: "Book lab visit".to_string(),
                    priority: TaskPriority::Low,
                },
            ),
            Utc::now(),
        )
        .await
        .expect("add");
        let id = added
            .output
            .strip_prefix("added task ")
            .expect("task id")
            .to_string();

        let toggled = run(&options(dir.path(), Command::TaskToggle { id }), Utc::now())
            .await
            .expect("toggle");
        assert!(toggled.output.ends_with("is done"));
    }

    #[tokio::test]
    async fn offline_chat_remembers_turn_and_appends_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = run(
            &options(
                dir.path(),
                Command::Chat {
                    message: "a medical question".to_string(),
                    action: None,
                    remember: true,
                    offline: true,
                    report: true,
                    contact: Some("email".to_string()),
                },
            ),
            Utc::now(),
        )
        .await
        .expect("run");

        assert!(!outcome.failed);
        let (reply, report) = outcome
            .output
            .split_once("\n\n")
            .expect("reply and report");
        assert!(reply.starts_with("As a physician"));
        let report: serde_json::Value = serde_json::from_str(report).expect("report json");
        assert_eq!(report["contactMethod"], "email");
        assert_eq!(report["interactions"].as_array().map(Vec::len), Some(2));

        let memories = run(
            &options(
                dir.path(),
                Command::MemoryList {
                    search: String::new(),
                },
            ),
            Utc::now(),
        )
        .await
        .expect("list");
        assert!(memories.output.contains("[conversation]"));
    }

    #[tokio::test]
    async fn personas_list_in_session_language() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut arabic = options(dir.path(), Command::Personas);
        arabic.language = Language::Ar;

        let listed = run(&arabic, Utc::now()).await.expect("personas");
        let first = listed.output.lines().next().expect("at least one persona");
        assert!(first.starts_with("ibn-sina"));
        assert!(first.contains("ابن سينا"));
        assert!(first.ends_with("[ar-EG]"));
        assert_eq!(listed.output.lines().count(), 11);
    }

    #[tokio::test]
    async fn unreachable_server_prints_apology() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = run(
            &options(
                dir.path(),
                Command::Chat {
                    message: "hello".to_string(),
                    action: None,
                    remember: true,
                    offline: false,
                    report: false,
                    contact: None,
                },
            ),
            Utc::now(),
        )
        .await
        .expect("run");

        assert!(outcome.failed);
        assert_eq!(outcome.output, APOLOGY_EN);
        assert!(!dir.path().join("ai-companion-memories.json").exists());
    }
}
