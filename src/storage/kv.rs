//! Key-value backing stores
//!
//! The ledger persists each piece of state under its own string key. The
//! file store keeps one `<key>.json` file per key; the memory store backs
//! tests and embedders that handle durability themselves.

use std::collections::HashMap;
use std::path::PathBuf;

use super::file_io::{read_optional, write_atomic};
use crate::error::{PettyCashError, PettyCashResult};

/// A string-keyed store of serialized values
pub trait KeyValueStore {
    /// Raw stored value for `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> PettyCashResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> PettyCashResult<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PettyCashResult<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PettyCashError::Storage(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PettyCashResult<Option<String>> {
        read_optional(self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> PettyCashResult<()> {
        write_atomic(self.path_for(key)?, value)
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PettyCashResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PettyCashResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "\"dark\"").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("\"dark\""));
        assert!(temp_dir.path().join("theme.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "1").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("targetTotal", "30000").unwrap();
        assert_eq!(store.raw("targetTotal"), Some("30000"));
    }
}
