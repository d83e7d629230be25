//! In-process record store.

use super::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// `HashMap`-backed store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `(key, value)` pairs.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRecordStore;
    use crate::store::RecordStore;

    #[tokio::test]
    async fn set_overwrites_and_remove_clears() {
        let store = MemoryRecordStore::with_entries([("tasks", "[]")]);
        assert_eq!(store.get("tasks").await.unwrap().as_deref(), Some("[]"));

        store.set("tasks", "[1]").await.unwrap();
        assert_eq!(store.get("tasks").await.unwrap().as_deref(), Some("[1]"));

        store.remove("tasks").await.unwrap();
        assert_eq!(store.get("tasks").await.unwrap(), None);
    }
}
