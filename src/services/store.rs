//! Key-value persistence for progress, parent settings and analytics.
//!
//! Values are JSON. Callers treat every failure as a no-op: they log it and
//! carry on, so a broken disk never stops a child from playing.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O failed for {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stored value for '{key}' is not valid JSON")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Load and log-and-swallow any failure.
pub fn load_or_default<S: KeyValueStore + ?Sized, T>(store: &S, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match store.load(key) {
        Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|err| {
            warn!(key, error = %err, "stored value has an unexpected shape, using defaults");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "failed to load");
            T::default()
        }
    }
}

/// Save and log-and-swallow any failure.
pub fn save_quietly<S: KeyValueStore + ?Sized, T: serde::Serialize>(store: &S, key: &str, value: &T) {
    let result = serde_json::to_value(value)
        .map_err(|source| StoreError::Corrupt { key: key.to_string(), source })
        .and_then(|v| store.save(key, &v));
    if let Err(err) = result {
        warn!(key, error = %err, "failed to save");
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key: key.to_string(), source })
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        let raw = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Corrupt { key: key.to_string(), source })?;
        fs::write(&path, raw).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sprouts-store-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn memory_store_round_trip_and_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", &json!({"level": 3})).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(json!({"level": 3})));
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = scratch_dir("persist");
        FileStore::new(&dir).save("math_sprouts_progress", &json!([1, 2])).unwrap();
        let again = FileStore::new(&dir);
        assert_eq!(again.dir(), dir.as_path());
        assert!(dir.join("math_sprouts_progress.json").is_file());
        assert_eq!(again.load("math_sprouts_progress").unwrap(), Some(json!([1, 2])));
        again.remove("math_sprouts_progress").unwrap();
        assert_eq!(again.load("math_sprouts_progress").unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new(scratch_dir("keys"));
        assert!(matches!(store.load("../etc/passwd"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.json"), "{not json").unwrap();
        let store = FileStore::new(&dir);
        assert!(matches!(store.load("broken"), Err(StoreError::Corrupt { .. })));
        let fallback: Vec<u32> = load_or_default(&store, "broken");
        assert!(fallback.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }
}
