//! In-process record store
//!
//! Backs dev mode when no remote store is configured, and the test suite.
//! Can be switched offline to exercise the unavailable path.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError, StoreResult, StoredRecord};
use crate::identity::RecordId;

struct Entry {
    name: String,
    body: Value,
}

/// Simple in-memory record store
pub struct MemoryRecordStore {
    records: Arc<RwLock<HashMap<RecordId, Entry>>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            offline: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// While offline every call fails with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful create/update calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, record: StoredRecord) -> StoreResult<RecordId> {
        self.check_online()?;

        let mut records = self.records.write().await;
        if records.contains_key(&record.key) {
            return Err(StoreError::Conflict(record.key));
        }
        records.insert(
            record.key.clone(),
            Entry {
                name: record.name,
                body: record.body,
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(record.key)
    }

    async fn get(&self, key: &RecordId) -> StoreResult<Option<Value>> {
        self.check_online()?;
        Ok(self.records.read().await.get(key).map(|e| e.body.clone()))
    }

    async fn update(&self, key: &RecordId, body: Value) -> StoreResult<bool> {
        self.check_online()?;

        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(entry) => {
                entry.body = body;
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<RecordId>> {
        self.check_online()?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|(_, e)| e.name == name)
            .map(|(k, _)| k.clone()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
