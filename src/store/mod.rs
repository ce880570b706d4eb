//! Record store contract
//!
//! The backing key-value service is external. This module narrows it to the
//! four calls the rest of the crate needs. Keys are the records' own ids
//! (see [`crate::identity`]), so nothing ever has to be patched in after a
//! write and `find_by_name` is never on the primary read path.
//!
//! Every call may fail with [`StoreError::Unavailable`]; nothing here retries.

mod http;
mod memory;

pub use http::{HttpRecordStore, HttpStoreConfig};
pub use memory::MemoryRecordStore;

use serde_json::Value;

use crate::identity::RecordId;

/// Store-layer error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport failure, timeout or unexpected status from the store
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record already exists under this key
    #[error("record already exists: {0}")]
    Conflict(RecordId),

    /// The store answered but the payload was not what we expected
    #[error("undecodable store response: {0}")]
    Decode(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A record ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Storage key; always equal to the id embedded in `body`
    pub key: RecordId,
    /// Secondary name, e.g. `proof_<id>`
    pub name: String,
    pub body: Value,
}

/// Narrow contract over the external key-value store
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record under its own key. Never rewrites the body.
    async fn create(&self, record: StoredRecord) -> StoreResult<RecordId>;

    /// Latest body stored under `key`
    async fn get(&self, key: &RecordId) -> StoreResult<Option<Value>>;

    /// Replace the body under `key`. Returns `false` if no such record exists.
    async fn update(&self, key: &RecordId, body: Value) -> StoreResult<bool>;

    /// Look a key up by its secondary name
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<RecordId>>;

    /// Short backend label for logs and health output
    fn backend(&self) -> &'static str;
}
