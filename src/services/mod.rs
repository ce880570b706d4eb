//! Verification service
//!
//! The six public operations (create/get for Requests, Proofs and Badges)
//! live on [`VerificationService`]. The service holds no mutable state of
//! its own: every call loads what it needs from the record store, works on
//! it, and writes any new record exactly once, under its own id.

mod badges;
mod proofs;
mod requests;

pub use badges::{BadgeReceipt, BadgeSubmission};
pub use proofs::{ProofReceipt, ProofSubmission};
pub use requests::NewRequest;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::identity::RecordId;
use crate::lifecycle::{is_expired, Clock};
use crate::records::Record;
use crate::signer::TokenSigner;
use crate::store::{RecordStore, StoredRecord};
use crate::types::{Result, VouchError};

/// Entry point for all record operations
pub struct VerificationService {
    store: Arc<dyn RecordStore>,
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        signer: Arc<dyn TokenSigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            signer,
            clock,
        }
    }

    /// Backend label of the underlying store
    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn signer(&self) -> &dyn TokenSigner {
        self.signer.as_ref()
    }

    /// Write a new record under its own id
    async fn persist<R: Record>(&self, record: &R) -> Result<()> {
        let key = record.id().clone();
        let body = serde_json::to_value(record)
            .map_err(|e| VouchError::Internal(format!("record serialization failed: {}", e)))?;

        let stored = self
            .store
            .create(StoredRecord {
                name: R::KIND.record_name(&key),
                key: key.clone(),
                body,
            })
            .await?;

        if stored != key {
            return Err(VouchError::Internal(format!(
                "store keyed {} record {} as {}",
                R::KIND.as_str(),
                key,
                stored
            )));
        }

        debug!(kind = R::KIND.as_str(), id = %key, "Record persisted");
        Ok(())
    }

    /// Load a live record, distinguishing missing from expired
    async fn load<R: Record>(&self, raw_id: &str) -> Result<R> {
        let kind = R::KIND;
        let Some(id) = RecordId::parse(raw_id) else {
            return Err(VouchError::BadRequest(format!("{} ID is required", kind)));
        };

        let body = self
            .store
            .get(&id)
            .await?
            .ok_or(VouchError::NotFound(kind))?;

        // A key can hold any kind; a body that does not decode as R was
        // never an R.
        let record: R = match serde_json::from_value(body) {
            Ok(record) => record,
            Err(e) => {
                debug!(kind = kind.as_str(), id = %id, error = %e, "Stored body is not this kind");
                return Err(VouchError::NotFound(kind));
            }
        };

        if record.id() != &id {
            warn!(kind = kind.as_str(), key = %id, embedded = %record.id(), "Embedded id does not match key");
            return Err(VouchError::NotFound(kind));
        }

        if is_expired(&record, self.clock.now()) {
            debug!(kind = kind.as_str(), id = %id, "Record expired");
            return Err(VouchError::Expired(kind));
        }

        Ok(record)
    }
}
