use serde::{Deserialize, Serialize};
use tracing::info;

use super::VerificationService;
use crate::compare::ExtractedData;
use crate::identity::{self, RecordId};
use crate::lifecycle::stamp;
use crate::records::{Badge, BADGE_TYPE};
use crate::signer::sign_record;
use crate::types::{Result, VouchError};

/// Input for creating a Badge
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSubmission {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub extracted_data: Option<ExtractedData>,
    #[serde(default)]
    pub selected_fields: Option<Vec<String>>,
}

/// What a caller gets back after creating a Badge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeReceipt {
    pub badge_id: RecordId,
    pub token: String,
    /// The badge as signed, without its token
    pub results: Badge,
}

impl VerificationService {
    /// Create, sign and store a Badge
    pub async fn create_badge(&self, submission: BadgeSubmission) -> Result<BadgeReceipt> {
        let display_name = submission.display_name.filter(|n| !n.trim().is_empty());
        let (display_name, extracted_data) = match (display_name, submission.extracted_data) {
            (Some(name), Some(data)) => (name, data),
            _ => {
                return Err(VouchError::MissingFields(
                    "displayName, extractedData".to_string(),
                ))
            }
        };

        let now = self.clock.now();
        let times = stamp(now);
        let badge = Badge {
            badge_id: identity::bind()?,
            display_name,
            extracted_data,
            selected_fields: submission.selected_fields.unwrap_or_default(),
            record_type: BADGE_TYPE.to_string(),
            created_at: times.created_at,
            expires_at: times.expires_at,
            is_valid: true,
            token: None,
        };

        let token = sign_record(self.signer.as_ref(), &badge, now)?;
        self.persist(&badge.clone().signed(token.clone())).await?;

        info!(badge_id = %badge.badge_id, fields = badge.selected_fields.len(), "Badge created");

        Ok(BadgeReceipt {
            badge_id: badge.badge_id.clone(),
            token,
            results: badge,
        })
    }

    /// Fetch a live Badge
    pub async fn get_badge(&self, id: &str) -> Result<Badge> {
        self.load(id).await
    }
}
