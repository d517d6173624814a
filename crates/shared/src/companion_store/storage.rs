use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::CompanionStoreError;

/// String-keyed persistence for the companion store. Values are whole JSON
/// documents; every `set` replaces the previous value for that key.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CompanionStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CompanionStoreError>;
}

/// One `<key>.json` file per key under `root`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CompanionStoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|err| storage_error(&path, err))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CompanionStoreError> {
        fs::create_dir_all(&self.root).map_err(|err| storage_error(&self.root, err))?;

        let path = self.path_for(key);
        let tmp_path = self.root.join(format!(".{key}.json.tmp"));

        let mut tmp_file = File::create(&tmp_path).map_err(|err| storage_error(&tmp_path, err))?;
        tmp_file
            .write_all(value.as_bytes())
            .and_then(|()| tmp_file.sync_all())
            .map_err(|err| storage_error(&tmp_path, err))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).map_err(|err| storage_error(&path, err))
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> CompanionStoreError {
    CompanionStoreError::Storage(format!("{}: {err}", path.display()))
}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CompanionStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CompanionStoreError::Storage("in-memory storage lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CompanionStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CompanionStoreError::Storage("in-memory storage lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStorage, InMemoryStorage, KeyValueStorage};

    #[test]
    fn file_storage_round_trips_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("ai-companion-tasks").expect("get"), None);
        storage
            .set("ai-companion-tasks", "[]")
            .expect("set should succeed");
        storage
            .set("ai-companion-tasks", "[1]")
            .expect("overwrite should succeed");

        assert_eq!(
            storage.get("ai-companion-tasks").expect("get"),
            Some("[1]".to_string())
        );
        let names: Vec<String> = std::fs::read_dir(storage.root())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ai-companion-tasks.json".to_string()]);
    }

    #[test]
    fn blank_file_reads_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("ai-companion-memories.json"), "  \n").expect("write");

        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("ai-companion-memories").expect("get"), None);
    }

    #[test]
    fn in_memory_storage_overwrites() {
        let storage = InMemoryStorage::default();
        storage.set("k", "a").expect("set");
        storage.set("k", "b").expect("set");
        assert_eq!(storage.get("k").expect("get"), Some("b".to_string()));
    }
}
