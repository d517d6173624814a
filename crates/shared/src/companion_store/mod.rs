//! Device-local journal of memories, tasks and integration toggles. The
//! storage backend is the only source of truth; there is no server mirror
//! and the last write wins.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{generate_record_id, iso_timestamp};

mod storage;

pub use storage::{FileStorage, InMemoryStorage, KeyValueStorage};

pub const MEMORIES_KEY: &str = "ai-companion-memories";
pub const TASKS_KEY: &str = "ai-companion-tasks";
pub const INTEGRATIONS_KEY: &str = "ai-companion-integrations";

pub const DEFAULT_INTEGRATIONS: [&str; 6] = [
    "GensPark",
    "Perplexity",
    "Claude",
    "Gemini",
    "Character.AI",
    "Manus",
];

#[derive(Debug, Error)]
pub enum CompanionStoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt data under key {key}: {message}")]
    Corrupt { key: &'static str, message: String },
    #[error("{0} must not be empty")]
    EmptyContent(&'static str),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    Conversation,
    Task,
    Insight,
    Learning,
    Document,
}

impl MemoryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Task => "task",
            Self::Insight => "insight",
            Self::Learning => "learning",
            Self::Document => "document",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "conversation" => Some(Self::Conversation),
            "task" => Some(Self::Task),
            "insight" => Some(Self::Insight),
            "learning" => Some(Self::Learning),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub content: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub memory_type: MemoryType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    pub name: String,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionExport {
    pub memories: Vec<MemoryRecord>,
    pub tasks: Vec<TaskRecord>,
    pub integrations: Vec<IntegrationStatus>,
    pub export_date: String,
}

impl CompanionExport {
    pub fn to_pretty_json(&self) -> Result<String, CompanionStoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| CompanionStoreError::Storage(err.to_string()))
    }
}

/// `ai-companion-data-YYYY-MM-DD.json` for the UTC date of `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("ai-companion-data-{}.json", now.format("%Y-%m-%d"))
}

pub struct CompanionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> CompanionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn memories(&self) -> Result<Vec<MemoryRecord>, CompanionStoreError> {
        Ok(self.load(MEMORIES_KEY)?.unwrap_or_default())
    }

    /// Prepends a record so the list stays most-recent-first.
    pub fn add_memory(
        &self,
        content: &str,
        memory_type: MemoryType,
        now: DateTime<Utc>,
    ) -> Result<MemoryRecord, CompanionStoreError> {
        if content.trim().is_empty() {
            return Err(CompanionStoreError::EmptyContent("memory content"));
        }

        let record = MemoryRecord {
            id: generate_record_id(),
            content: content.to_string(),
            timestamp: iso_timestamp(now),
            memory_type,
        };

        let mut memories = self.memories()?;
        memories.insert(0, record.clone());
        self.save(MEMORIES_KEY, &memories)?;
        Ok(record)
    }

    pub fn remove_memory(&self, id: &str) -> Result<bool, CompanionStoreError> {
        let mut memories = self.memories()?;
        let before = memories.len();
        memories.retain(|memory| memory.id != id);
        if memories.len() == before {
            return Ok(false);
        }

        self.save(MEMORIES_KEY, &memories)?;
        Ok(true)
    }

    /// Case-insensitive substring match on content; a blank term lists all.
    pub fn list_memories(&self, search: &str) -> Result<Vec<MemoryRecord>, CompanionStoreError> {
        let needle = search.to_lowercase();
        let mut memories = self.memories()?;
        memories.retain(|memory| memory.content.to_lowercase().contains(&needle));
        Ok(memories)
    }

    pub fn tasks(&self) -> Result<Vec<TaskRecord>, CompanionStoreError> {
        Ok(self.load(TASKS_KEY)?.unwrap_or_default())
    }

    pub fn add_task(
        &self,
        title: &str,
        priority: TaskPriority,
        now: DateTime<Utc>,
    ) -> Result<TaskRecord, CompanionStoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CompanionStoreError::EmptyContent("task title"));
        }

        let task = TaskRecord {
            id: generate_record_id(),
            title: title.to_string(),
            completed: false,
            priority,
            created_at: iso_timestamp(now),
        };

        let mut tasks = self.tasks()?;
        tasks.insert(0, task.clone());
        self.save(TASKS_KEY, &tasks)?;
        Ok(task)
    }

    pub fn toggle_task(&self, id: &str) -> Result<TaskRecord, CompanionStoreError> {
        let mut tasks = self.tasks()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| CompanionStoreError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        task.completed = !task.completed;
        let toggled = task.clone();

        self.save(TASKS_KEY, &tasks)?;
        Ok(toggled)
    }

    pub fn integrations(&self) -> Result<Vec<IntegrationStatus>, CompanionStoreError> {
        Ok(self.load(INTEGRATIONS_KEY)?.unwrap_or_else(|| {
            DEFAULT_INTEGRATIONS
                .iter()
                .map(|name| IntegrationStatus {
                    name: (*name).to_string(),
                    connected: false,
                    last_sync: None,
                })
                .collect()
        }))
    }

    /// Names match case-insensitively. Connecting stamps `lastSync`.
    pub fn set_integration_connected(
        &self,
        name: &str,
        connected: bool,
        now: DateTime<Utc>,
    ) -> Result<IntegrationStatus, CompanionStoreError> {
        let mut integrations = self.integrations()?;
        let integration = integrations
            .iter_mut()
            .find(|integration| integration.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CompanionStoreError::NotFound {
                kind: "integration",
                id: name.to_string(),
            })?;
        integration.connected = connected;
        if connected {
            integration.last_sync = Some(iso_timestamp(now));
        }
        let updated = integration.clone();

        self.save(INTEGRATIONS_KEY, &integrations)?;
        Ok(updated)
    }

    pub fn export_all(&self, now: DateTime<Utc>) -> Result<CompanionExport, CompanionStoreError> {
        Ok(CompanionExport {
            memories: self.memories()?,
            tasks: self.tasks()?,
            integrations: self.integrations()?,
            export_date: iso_timestamp(now),
        })
    }

    fn load<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, CompanionStoreError> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| CompanionStoreError::Corrupt {
                key,
                message: err.to_string(),
            })
    }

    fn save<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), CompanionStoreError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| CompanionStoreError::Storage(err.to_string()))?;
        self.storage.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{
        CompanionExport, CompanionStore, CompanionStoreError, FileStorage, InMemoryStorage,
        KeyValueStorage, MEMORIES_KEY, MemoryType, TaskPriority, export_file_name,
    };

    fn memory_store() -> CompanionStore<InMemoryStorage> {
        CompanionStore::new(InMemoryStorage::default())
    }

    #[test]
    fn added_memory_lists_once_most_recent_first() {
        let store = memory_store();
        let older = store
            .add_memory("first note", MemoryType::Insight, Utc::now())
            .expect("add");
        let newer = store
            .add_memory("second note", MemoryType::Learning, Utc::now())
            .expect("add");

        let listed = store.list_memories("").expect("list");
        assert_eq!(listed, vec![newer, older]);
    }

    #[test]
    fn follow_up_scenario_searches_and_removes() {
        let store = memory_store();
        let record = store
            .add_memory("Patient follow-up notes", MemoryType::Document, Utc::now())
            .expect("add");
        store
            .add_memory("Unrelated insight", MemoryType::Insight, Utc::now())
            .expect("add");

        let found = store.list_memories("FOLLOW-UP").expect("list");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content, "Patient follow-up notes");

        assert!(store.remove_memory(&record.id).expect("remove"));
        assert!(!store.remove_memory(&record.id).expect("second remove"));
        assert!(store.list_memories("follow-up").expect("list").is_empty());
        assert_eq!(store.list_memories("").expect("list").len(), 1);
    }

    #[test]
    fn blank_memory_is_rejected() {
        let err = memory_store()
            .add_memory("   ", MemoryType::Document, Utc::now())
            .expect_err("blank content");
        assert!(matches!(err, CompanionStoreError::EmptyContent(_)));
    }

    #[test]
    fn export_keeps_memory_count_and_shape() {
        let store = memory_store();
        for content in ["a", "b", "c"] {
            store
                .add_memory(content, MemoryType::Conversation, Utc::now())
                .expect("add");
        }
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();

        let json = store
            .export_all(now)
            .expect("export")
            .to_pretty_json()
            .expect("serialize");
        let parsed: CompanionExport = serde_json::from_str(&json).expect("parse back");
        let raw: serde_json::Value = serde_json::from_str(&json).expect("value");

        assert_eq!(parsed.memories.len(), 3);
        assert_eq!(parsed.integrations.len(), 6);
        assert_eq!(raw["exportDate"], "2026-03-04T05:06:07.000Z");
        assert_eq!(raw["memories"][0]["type"], "conversation");
        assert_eq!(export_file_name(now), "ai-companion-data-2026-03-04.json");
    }

    #[test]
    fn tasks_toggle_and_report_missing_ids() {
        let store = memory_store();
        let task = store
            .add_task("Call the pharmacy", TaskPriority::High, Utc::now())
            .expect("add");
        assert!(!task.completed);

        assert!(store.toggle_task(&task.id).expect("toggle").completed);
        assert!(!store.toggle_task(&task.id).expect("toggle").completed);
        assert!(matches!(
            store.toggle_task("missing"),
            Err(CompanionStoreError::NotFound { kind: "task", .. })
        ));
    }

    #[test]
    fn integrations_start_disconnected_and_persist_changes() {
        let store = memory_store();
        assert!(store.integrations().expect("list").iter().all(|i| !i.connected));

        let claude = store
            .set_integration_connected("claude", true, Utc::now())
            .expect("connect");
        assert_eq!(claude.name, "Claude");
        assert!(claude.last_sync.is_some());

        let integrations = store.integrations().expect("list");
        assert_eq!(integrations.iter().filter(|i| i.connected).count(), 1);
        assert!(store.set_integration_connected("Skynet", true, Utc::now()).is_err());
    }

    #[test]
    fn corrupt_payload_surfaces_key() {
        let storage = InMemoryStorage::default();
        storage.set(MEMORIES_KEY, "{not json").expect("seed");

        let err = CompanionStore::new(storage).memories().expect_err("corrupt");
        assert!(matches!(
            err,
            CompanionStoreError::Corrupt {
                key: MEMORIES_KEY,
                ..
            }
        ));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = CompanionStore::new(FileStorage::new(dir.path()))
            .add_memory("persisted", MemoryType::Task, Utc::now())
            .expect("add");

        let reopened = CompanionStore::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.memories().expect("load"), vec![record]);
    }
}
