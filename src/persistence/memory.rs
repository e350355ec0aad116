//! An in-process [`StateStore`], used by tests and by embedders that do not
//! need cross-process visibility.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    error::PersistenceError,
    traits::{StateKey, StateStore},
};

/// Keeps every key in a map behind an async mutex.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: Mutex<HashMap<StateKey, Vec<u8>>>,
}

impl InMemoryStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a value is stored for `key`.
    pub async fn contains(&self, key: StateKey) -> bool {
        self.entries.lock().await.contains_key(&key)
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn read(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn write(&self, key: StateKey, contents: Vec<u8>) -> Result<(), PersistenceError> {
        self.entries.lock().await.insert(key, contents);
        Ok(())
    }

    async fn delete(&self, key: StateKey) -> Result<(), PersistenceError> {
        self.entries.lock().await.remove(&key);
        Ok(())
    }

    async fn take(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.entries.lock().await.remove(&key))
    }
}
