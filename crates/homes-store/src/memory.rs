//! In-process store.
//!
//! `MemoryStore` keeps records in insertion order behind a `tokio` read/write
//! lock. One instance is constructed per session and handed to whatever needs
//! it by reference.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::{Record, Store};

/// A store that holds its records in memory.
///
/// # Example
///
/// ```
/// use homes_store::models::{NewSavedRelation, SavedRelation};
/// use homes_store::{MemoryStore, Store};
///
/// # async fn example() -> homes_store::Result<()> {
/// let store: MemoryStore<SavedRelation> = MemoryStore::new();
/// let relation = store.create(NewSavedRelation::now("42")).await?;
/// assert_eq!(store.get_all().await?, vec![relation]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
    offline: AtomicBool,
}

impl<R: Record> MemoryStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a store seeded with the given records, kept in order.
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulates a transport outage. While offline every call fails with
    /// [`StoreError::Unavailable`] and nothing is read or written.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(format!(
                "{} store is offline",
                R::RESOURCE
            )));
        }
        Ok(())
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a fresh record identifier.
pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl<R: Record> Store<R> for MemoryStore<R> {
    async fn get_all(&self) -> Result<Vec<R>> {
        self.check_online()?;
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        self.check_online()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, draft: R::Draft) -> Result<R> {
        self.check_online()?;
        R::validate_draft(&draft)?;

        let record = R::from_draft(new_record_id(), draft);
        self.records.write().await.push(record.clone());
        info!(resource = R::RESOURCE, id = record.id(), "created record");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: R::Patch) -> Result<R> {
        self.check_online()?;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::RESOURCE, id))?;

        record.apply_patch(patch);
        info!(resource = R::RESOURCE, id, "updated record");
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<R> {
        self.check_online()?;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::RESOURCE, id))?;

        let removed = records.remove(index);
        info!(resource = R::RESOURCE, id, "deleted record");
        Ok(removed)
    }
}
