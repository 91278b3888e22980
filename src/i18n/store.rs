//! Durable key-value store for the language preference.

use crate::error::SiteError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Key the language preference is persisted under.
pub const LANGUAGE_PREFERENCE_KEY: &str = "user-lang";

/// Client-side durable store (the browser's local storage, or a file).
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SiteError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError>;
}

/// Volatile store, used in tests and when persistence is disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SiteError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// The file is read on every `get` and rewritten on every `set`, so two
/// sessions sharing a file see each other's last write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SiteError> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) if body.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(body) => serde_json::from_str(&body).map_err(|e| {
                SiteError::Store(format!("{} is corrupt: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SiteError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        // A corrupt file is replaced rather than blocking the write
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        debug!("Persisted {}={} to {}", key, value, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(LANGUAGE_PREFERENCE_KEY).unwrap(), None);

        store.set(LANGUAGE_PREFERENCE_KEY, "en").unwrap();
        assert_eq!(
            store.get(LANGUAGE_PREFERENCE_KEY).unwrap(),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("prefs.json"));

        assert_eq!(store.get(LANGUAGE_PREFERENCE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_dirs_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::new(&path);
        store.set(LANGUAGE_PREFERENCE_KEY, "tr").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get(LANGUAGE_PREFERENCE_KEY).unwrap(),
            Some("tr".to_string())
        );
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set(LANGUAGE_PREFERENCE_KEY, "en").unwrap();

        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_file_store_corrupt_file_errors_on_read_but_recovers_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get(LANGUAGE_PREFERENCE_KEY),
            Err(SiteError::Store(_))
        ));

        store.set(LANGUAGE_PREFERENCE_KEY, "en").unwrap();
        assert_eq!(
            store.get(LANGUAGE_PREFERENCE_KEY).unwrap(),
            Some("en".to_string())
        );
    }
}
