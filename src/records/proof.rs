use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordKind};
use crate::compare::{ExtractedData, MatchOutcome};
use crate::identity::RecordId;
use crate::lifecycle::Expiring;

/// Signed outcome of checking a target's data against a Request.
///
/// `token` is absent on the unsigned form handed to the signer and returned
/// as `results`; the stored form always carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub proof_id: RecordId,
    pub request_id: RecordId,
    pub height_match: MatchOutcome,
    pub age_match: MatchOutcome,
    pub location_match: MatchOutcome,
    pub name_match: bool,
    pub requester_name: String,
    pub target_name: String,
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Proof {
    /// The token, if present and non-empty
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Same proof carrying `token`
    pub fn signed(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl Expiring for Proof {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Record for Proof {
    const KIND: RecordKind = RecordKind::Proof;

    fn id(&self) -> &RecordId {
        &self.proof_id
    }
}
