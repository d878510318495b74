use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use super::atomic_io::write_text_atomic;

const FILE_STORE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store key '{key}' is invalid (expected ASCII letters, digits, '_' or '-')")]
    InvalidKey { key: String },
    #[error("store quota exceeded writing '{key}': {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// String key/value persistence, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replaces any previous value under `key` in full.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<bool, StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the total size of keys plus values, like a browser storage quota.
    pub fn with_quota_bytes(quota_bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }
}

/// One file per key under a data directory: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_STORE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        write_text_atomic(&path, value).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = value.len(), "store_entry_written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_whole_value() {
        let mut store = MemoryStore::new();
        store.set("currentLevel", "{\"a\":1}").expect("set");
        store.set("currentLevel", "{}").expect("overwrite");
        assert_eq!(
            store.get("currentLevel").expect("get").as_deref(),
            Some("{}")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_quota_rejects_write_and_keeps_previous_value() {
        let mut store = MemoryStore::with_quota_bytes(20);
        store.set("currentLevel", "small").expect("fits");
        let error = store
            .set("currentLevel", "this value is far too large")
            .expect_err("over quota");
        assert!(matches!(error, StoreError::QuotaExceeded { limit: 20, .. }));
        assert_eq!(
            store.get("currentLevel").expect("get").as_deref(),
            Some("small")
        );
    }

    #[test]
    fn keys_with_path_characters_are_rejected() {
        let mut store = MemoryStore::new();
        for key in ["", "../level", "a/b", "level.json"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey { .. })),
                "key={key}"
            );
        }
    }

    #[test]
    fn file_store_round_trips_and_reports_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path());

        assert!(store.get("currentLevel").expect("get").is_none());
        store.set("currentLevel", "{\"platforms\":[]}").expect("set");
        assert_eq!(
            store.get("currentLevel").expect("get").as_deref(),
            Some("{\"platforms\":[]}")
        );
        assert!(dir.path().join("currentLevel.json").is_file());

        assert!(store.remove("currentLevel").expect("remove"));
        assert!(!store.remove("currentLevel").expect("remove again"));
    }
}
