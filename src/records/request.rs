use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_text, Record, RecordKind};
use crate::compare::ClaimField;
use crate::identity::RecordId;
use crate::lifecycle::{Expiring, Stamp};

/// A claim-verification invitation.
///
/// Immutable after creation; becomes logically dead once `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub id: RecordId,
    pub requester_name: String,
    pub target_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_height: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_location: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl VerificationRequest {
    pub fn new(
        id: RecordId,
        requester_name: String,
        target_name: String,
        claims: [Option<String>; 3],
        stamp: Stamp,
    ) -> Self {
        let [claimed_height, claimed_age, claimed_location] = claims;
        Self {
            id,
            requester_name,
            target_name,
            claimed_height,
            claimed_age,
            claimed_location,
            created_at: stamp.created_at,
            expires_at: stamp.expires_at,
        }
    }

    /// Claimed value for `field`, if one was made
    pub fn claim(&self, field: ClaimField) -> Option<&str> {
        match field {
            ClaimField::Height => self.claimed_height.as_deref(),
            ClaimField::Age => self.claimed_age.as_deref(),
            ClaimField::Location => self.claimed_location.as_deref(),
        }
    }
}

impl Expiring for VerificationRequest {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Record for VerificationRequest {
    const KIND: RecordKind = RecordKind::Request;

    fn id(&self) -> &RecordId {
        &self.id
    }
}
