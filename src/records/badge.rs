use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordKind};
use crate::compare::ExtractedData;
use crate::identity::RecordId;
use crate::lifecycle::Expiring;

/// Value of the `type` field on every badge
pub const BADGE_TYPE: &str = "badge";

fn badge_type() -> String {
    BADGE_TYPE.to_string()
}

/// Shareable disclosure summary built straight from submitted data.
///
/// `selected_fields` records what the holder consents to disclose; badges are
/// never compared against claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub badge_id: RecordId,
    pub display_name: String,
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(rename = "type", default = "badge_type")]
    pub record_type: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Badge {
    /// Same badge carrying `token`
    pub fn signed(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl Expiring for Badge {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Record for Badge {
    const KIND: RecordKind = RecordKind::Badge;

    fn id(&self) -> &RecordId {
        &self.badge_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_on_decode() {
        let badge: Badge = serde_json::from_value(json!({
            "badgeId": "b1",
            "displayName": "Alex",
            "extractedData": {"age": "31"},
            "createdAt": 0,
            "expiresAt": 86_400_000
        }))
        .unwrap();

        assert!(badge.selected_fields.is_empty());
        assert_eq!(badge.record_type, BADGE_TYPE);
        assert!(badge.token.is_none());
    }

    #[test]
    fn test_type_key_on_wire() {
        let badge: Badge = serde_json::from_value(json!({
            "badgeId": "b1",
            "displayName": "Alex",
            "extractedData": {},
            "selectedFields": ["age"],
            "type": "badge",
            "createdAt": 0,
            "expiresAt": 86_400_000,
            "isValid": true
        }))
        .unwrap();

        let value = serde_json::to_value(badge.signed("tok".into())).unwrap();
        assert_eq!(value["type"], json!("badge"));
        assert_eq!(value["selectedFields"], json!(["age"]));
        assert_eq!(value["token"], json!("tok"));
    }
}
