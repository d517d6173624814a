use std::path::PathBuf;

use shared::companion_store::{MemoryType, TaskPriority};
use shared::models::ActionKind;
use shared::personas::{Language, PersonaId};
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_DATA_DIR: &str = ".ai-companion";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat {
        message: String,
        action: Option<ActionKind>,
        remember: bool,
        offline: bool,
        report: bool,
        contact: Option<String>,
    },
    Personas,
    MemoryAdd {
        content: String,
        memory_type: MemoryType,
    },
    MemoryList {
        search: String,
    },
    MemoryRemove {
        id: String,
    },
    MemoryExport {
        out: Option<PathBuf>,
    },
    TaskAdd {
        title: String,
        priority: TaskPriority,
    },
    TaskList,
    TaskToggle {
        id: String,
    },
    IntegrationList,
    IntegrationSet {
        name: String,
        connected: bool,
    },
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub server_url: String,
    pub data_dir: PathBuf,
    pub language: Language,
    pub persona: PersonaId,
    pub user_id: Option<String>,
    pub command: Command,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for argument: {0}")]
    MissingValue(String),
    #[error("invalid {flag} value: {value}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingOperand(&'static str),
    #[error("help requested")]
    HelpRequested,
}

#[derive(Default)]
struct Flags {
    server_url: Option<String>,
    data_dir: Option<PathBuf>,
    language: Option<Language>,
    persona: Option<PersonaId>,
    user_id: Option<String>,
    memory_type: Option<MemoryType>,
    priority: Option<TaskPriority>,
    action: Option<ActionKind>,
    out: Option<PathBuf>,
    contact: Option<String>,
    remember: bool,
    offline: bool,
    report: bool,
}

impl CliOptions {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Flags::default();
        let mut positional = Vec::new();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(CliError::HelpRequested),
                "--remember" => flags.remember = true,
                "--offline" => flags.offline = true,
                "--report" => flags.report = true,
                "--contact" => flags.contact = Some(value_for(&mut iter, &arg)?),
                "--server" => flags.server_url = Some(value_for(&mut iter, &arg)?),
                "--data-dir" => flags.data_dir = Some(PathBuf::from(value_for(&mut iter, &arg)?)),
                "--out" => flags.out = Some(PathBuf::from(value_for(&mut iter, &arg)?)),
                "--user" => flags.user_id = Some(value_for(&mut iter, &arg)?),
                "--lang" => {
                    let value = value_for(&mut iter, &arg)?;
                    flags.language = Some(parse_language(&value)?);
                }
                "--persona" => {
                    let value = value_for(&mut iter, &arg)?;
                    flags.persona = Some(PersonaId::parse(&value).ok_or(CliError::InvalidValue {
                        flag: "--persona",
                        value,
                    })?);
                }
                "--type" => {
                    let value = value_for(&mut iter, &arg)?;
                    flags.memory_type = Some(MemoryType::parse(&value).ok_or(
                        CliError::InvalidValue {
                            flag: "--type",
                            value,
                        },
                    )?);
                }
                "--priority" => {
                    let value = value_for(&mut iter, &arg)?;
                    flags.priority = Some(TaskPriority::parse(&value).ok_or(
                        CliError::InvalidValue {
                            flag: "--priority",
                            value,
                        },
                    )?);
                }
                "--action" => {
                    let value = value_for(&mut iter, &arg)?;
                    flags.action = Some(ActionKind::parse(&value).ok_or(CliError::InvalidValue {
                        flag: "--action",
                        value,
                    })?);
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnknownArgument(flag.to_string()));
                }
                _ => positional.push(arg),
            }
        }

        let command = parse_command(&positional, &flags)?;
        Ok(Self {
            server_url: flags
                .server_url
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            data_dir: flags
                .data_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            language: flags.language.unwrap_or(Language::Ar),
            persona: flags.persona.unwrap_or(shared::personas::DEFAULT_PERSONA),
            user_id: flags.user_id,
            command,
        })
    }
}

fn parse_command(positional: &[String], flags: &Flags) -> Result<Command, CliError> {
    let Some((name, rest)) = positional.split_first() else {
        return Err(CliError::MissingCommand);
    };

    match (name.as_str(), rest) {
        ("chat", words) => Ok(Command::Chat {
            message: joined(words, "message")?,
            action: flags.action,
            remember: flags.remember,
            offline: flags.offline,
            report: flags.report,
            contact: flags.contact.clone(),
        }),
        ("personas", []) => Ok(Command::Personas),
        ("memory", [sub, words @ ..]) => match sub.as_str() {
            "add" => Ok(Command::MemoryAdd {
                content: joined(words, "memory content")?,
                memory_type: flags.memory_type.unwrap_or(MemoryType::Document),
            }),
            "list" => Ok(Command::MemoryList {
                search: words.join(" "),
            }),
            "remove" => Ok(Command::MemoryRemove {
                id: single(words, "memory id")?,
            }),
            "export" => Ok(Command::MemoryExport {
                out: flags.out.clone(),
            }),
            other => Err(CliError::UnknownCommand(format!("memory {other}"))),
        },
        ("tasks", [sub, words @ ..]) => match sub.as_str() {
            "add" => Ok(Command::TaskAdd {
                title: joined(words, "task title")?,
                priority: flags.priority.unwrap_or(TaskPriority::Medium),
            }),
            "list" => Ok(Command::TaskList),
            "toggle" => Ok(Command::TaskToggle {
                id: single(words, "task id")?,
            }),
            other => Err(CliError::UnknownCommand(format!("tasks {other}"))),
        },
        ("integrations", [sub, words @ ..]) => match sub.as_str() {
            "list" => Ok(Command::IntegrationList),
            "connect" | "disconnect" => Ok(Command::IntegrationSet {
                name: joined(words, "integration name")?,
                connected: sub == "connect",
            }),
            other => Err(CliError::UnknownCommand(format!("integrations {other}"))),
        },
        ("memory", []) | ("tasks", []) | ("integrations", []) => {
            Err(CliError::MissingOperand("subcommand"))
        }
        (other, _) => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn value_for<I>(iter: &mut I, flag: &str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    iter.next()
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn parse_language(value: &str) -> Result<Language, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ar" => Ok(Language::Ar),
        "en" => Ok(Language::En),
        _ => Err(CliError::InvalidValue {
            flag: "--lang",
            value: value.to_string(),
        }),
    }
}

fn joined(words: &[String], what: &'static str) -> Result<String, CliError> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::MissingOperand(what));
    }
    Ok(text)
}

fn single(words: &[String], what: &'static str) -> Result<String, CliError> {
    match words {
        [value] => Ok(value.clone()),
        [] => Err(CliError::MissingOperand(what)),
        [_, extra, ..] => Err(CliError::UnknownArgument(extra.clone())),
    }
}
