//! Repository layer over key-value persistence adapters

pub mod inspections;
pub mod memory;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Inspection, Template},
};

pub use memory::MemoryStore;

/// Entity persisted by id
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

impl Entity for Template {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Inspection {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Persistence adapter contract: get / list / put / delete by id.
///
/// Implementations hand out owned copies; callers never hold references
/// into the store.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Option<T>>;

    /// All records in insertion order
    async fn list(&self) -> AppResult<Vec<T>>;

    /// Insert or replace the record with the entity's id
    async fn put(&self, entity: T) -> AppResult<()>;

    /// Returns false when nothing was stored under `id`
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Main repository struct holding the entity stores.
///
/// Writes to each entity kind are serialized through a dedicated gate so a
/// read-modify-write never interleaves with another one.
#[derive(Clone)]
pub struct Repository {
    templates: Arc<dyn Store<Template>>,
    inspections: Arc<dyn Store<Inspection>>,
    template_writes: Arc<Mutex<()>>,
    inspection_writes: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a repository over the given adapters
    pub fn new(
        templates: Arc<dyn Store<Template>>,
        inspections: Arc<dyn Store<Inspection>>,
    ) -> Self {
        Self {
            templates,
            inspections,
            template_writes: Arc::new(Mutex::new(())),
            inspection_writes: Arc::new(Mutex::new(())),
        }
    }

    /// Repository backed by in-process memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Template>::new()),
            Arc::new(MemoryStore::<Inspection>::new()),
        )
    }

    /// Hold the template write gate for a multi-step template change
    pub async fn lock_templates(&self) -> MutexGuard<'_, ()> {
        self.template_writes.lock().await
    }
}
