//! In-memory store adapter

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Entity, Store};
use crate::error::AppResult;

/// Insertion-ordered map guarded by a read/write lock
pub struct MemoryStore<T> {
    records: RwLock<IndexMap<Uuid, T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn get(&self, id: Uuid) -> AppResult<Option<T>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn put(&self, entity: T) -> AppResult<()> {
        self.records.write().await.insert(entity.id(), entity);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // shift_remove keeps the remaining records in insertion order
        Ok(self.records.write().await.shift_remove(&id).is_some())
    }
}
