use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not resolve home directory for store path")]
    HomeDirectoryUnavailable,
    #[error("store key '{key}' contains characters outside [a-z0-9_-]")]
    InvalidKey { key: String },
    #[error("failed to read store entry at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse store entry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write store entry at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize store entry: {0}")]
    Serialize(serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;
    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve_default_root() -> Result<PathBuf, StoreError> {
        let base_dirs = BaseDirs::new().ok_or(StoreError::HomeDirectoryUnavailable)?;
        Ok(base_dirs
            .home_dir()
            .join(".config")
            .join("zikr")
            .join("store"))
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.chars().all(|character| {
                character.is_ascii_lowercase()
                    || character.is_ascii_digit()
                    || character == '_'
                    || character == '-'
            });
        if !valid {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;

        let value =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse { path, source })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Write {
            path: self.root.clone(),
            source,
        })?;

        let serialized = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, serialized).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path).map_err(|source| StoreError::Write { path, source })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_keys() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        assert!(store.get("zikr-plans").expect("get").is_none());
    }

    #[test]
    fn set_then_get_round_trips_the_value() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("store"));

        let value = serde_json::json!({"version": 2, "plans": []});
        store.set("zikr-plans", &value).expect("set");

        assert_eq!(store.get("zikr-plans").expect("get"), Some(value));
        assert!(temp.path().join("store").join("zikr-plans.json").exists());
        assert!(!temp.path().join("store").join("zikr-plans.json.tmp").exists());
    }

    #[test]
    fn overwrite_replaces_the_previous_value() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());

        store.set("zikr-settings", &serde_json::json!({"a": 1})).expect("first set");
        store.set("zikr-settings", &serde_json::json!({"a": 2})).expect("second set");

        assert_eq!(
            store.get("zikr-settings").expect("get"),
            Some(serde_json::json!({"a": 2}))
        );
    }

    #[test]
    fn keys_outside_the_safe_alphabet_are_rejected() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());

        let error = store.get("../escape").expect_err("invalid key");
        assert!(matches!(error, StoreError::InvalidKey { .. }));

        let error = store
            .set("", &serde_json::Value::Null)
            .expect_err("empty key");
        assert!(matches!(error, StoreError::InvalidKey { .. }));
    }

    #[test]
    fn corrupt_entries_surface_a_parse_error_with_the_path() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        fs::write(temp.path().join("zikr-plans.json"), "{not json").expect("write corrupt");

        let error = store.get("zikr-plans").expect_err("parse failure");
        assert!(error.to_string().contains("zikr-plans.json"));
    }
}
