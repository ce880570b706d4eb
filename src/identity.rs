//! Record identifiers
//!
//! Every Request, Proof and Badge receives its identifier here, before the
//! record body is built. The same value is embedded in the stored body, used
//! as the storage key, and returned to the caller, so a record is reachable
//! by its id from its first and only write.

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Result, VouchError};

/// Number of random bytes behind each identifier (128 bits)
const ID_BYTES: usize = 16;

/// Canonical identifier for a stored record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Accept a caller-supplied identifier.
    ///
    /// Returns `None` for empty or whitespace-only input. Any other string is
    /// accepted as-is; an id that was never bound simply resolves to nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh identifier from the OS random source.
///
/// A failing random source is not retried.
pub fn bind() -> Result<RecordId> {
    let mut bytes = [0u8; ID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| VouchError::Entropy(e.to_string()))?;
    Ok(RecordId(hex::encode(bytes)))
}
