//! In-memory key-value storage.

use std::collections::HashMap;
use std::sync::RwLock;

use campus_core::Result;
use campus_core::error::StorageError;
use campus_core::traits::{Change, KeyValueStore};

/// A store that lives as long as the process, for tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::Io {
        message: "memory store lock poisoned".to_string(),
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }

    fn apply(&self, changes: &[Change<'_>]) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        for &(key, value) in changes {
            match value {
                Some(value) => values.insert(key.to_string(), value.to_string()),
                None => values.remove(key),
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        store.set("themeMode", "dark").unwrap();
        assert_eq!(store.get("themeMode").unwrap().as_deref(), Some("dark"));
        store.remove("themeMode").unwrap();
        assert!(store.is_empty());
        store.remove("themeMode").unwrap();
    }

    #[test]
    fn apply_sets_and_removes() {
        let store = MemoryStore::new();
        store.set("refreshToken", "r1").unwrap();
        store
            .apply(&[("accessToken", Some("a2")), ("refreshToken", None)])
            .unwrap();
        assert_eq!(store.get("accessToken").unwrap().as_deref(), Some("a2"));
        assert_eq!(store.get("refreshToken").unwrap(), None);
        assert_eq!(store.len(), 1);
    }
}
