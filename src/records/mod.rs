//! Stored record types
//!
//! - **Request**: a requester's invitation for a target to prove claims
//! - **Proof**: the outcome of comparing a target's data against a Request
//! - **Badge**: a standalone disclosure summary, no Request behind it
//!
//! All three are serialized with camelCase keys and millisecond timestamps,
//! and all three embed their own id under the same key they are stored at.

mod badge;
mod proof;
mod request;

pub use badge::{Badge, BADGE_TYPE};
pub use proof::Proof;
pub use request::VerificationRequest;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::compare::scalar_text;
use crate::identity::RecordId;
use crate::lifecycle::Expiring;

/// The three record kinds held in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Request,
    Proof,
    Badge,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Proof => "proof",
            Self::Badge => "badge",
        }
    }

    /// Store-level name for a record of this kind, e.g. `proof_<id>`
    pub fn record_name(&self, id: &RecordId) -> String {
        format!("{}_{}", self.as_str(), id)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Request => "Request",
            Self::Proof => "Proof",
            Self::Badge => "Badge",
        })
    }
}

/// A record that can be persisted and read back by id
pub trait Record: Serialize + DeserializeOwned + Expiring + Send + Sync {
    const KIND: RecordKind;

    /// Identifier embedded in the record body
    fn id(&self) -> &RecordId;
}

/// Deserialize an optional claim value leniently: strings, numbers and
/// booleans become text; null, blank strings and structures become `None`.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(scalar_text)
        .filter(|s| !s.trim().is_empty()))
}
