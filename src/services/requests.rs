use serde::Deserialize;
use tracing::info;

use super::VerificationService;
use crate::identity::{self, RecordId};
use crate::lifecycle::stamp;
use crate::records::{lenient_text, VerificationRequest};
use crate::types::{Result, VouchError};

/// Input for creating a Request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_height: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub claimed_location: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl VerificationService {
    /// Create a Request and return its id
    pub async fn create_request(&self, input: NewRequest) -> Result<RecordId> {
        let requester_name = required(input.requester_name);
        let target_name = required(input.target_name);

        let (requester_name, target_name) = match (requester_name, target_name) {
            (Some(r), Some(t)) => (r, t),
            (r, t) => {
                let missing: Vec<&str> = [("requesterName", r.is_none()), ("targetName", t.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                return Err(VouchError::MissingFields(missing.join(", ")));
            }
        };

        let id = identity::bind()?;
        let request = VerificationRequest::new(
            id.clone(),
            requester_name,
            target_name,
            [input.claimed_height, input.claimed_age, input.claimed_location],
            stamp(self.clock.now()),
        );

        self.persist(&request).await?;

        info!(request_id = %id, "Verification request created");
        Ok(id)
    }

    /// Fetch a live Request
    pub async fn get_request(&self, id: &str) -> Result<VerificationRequest> {
        self.load(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{harness, t0};
    use super::*;
    use crate::compare::ClaimField;
    use crate::records::RecordKind;
    use chrono::Duration;

    fn input() -> NewRequest {
        NewRequest {
            requester_name: Some("Sam".into()),
            target_name: Some("Alex".into()),
            claimed_height: Some("180cm".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _, _) = harness();
        let id = service.create_request(input()).await.unwrap();

        let request = service.get_request(id.as_str()).await.unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.claim(ClaimField::Height), Some("180cm"));
        assert_eq!(request.claim(ClaimField::Age), None);
        assert_eq!(request.created_at, t0());
        assert_eq!(request.expires_at, t0() + Duration::hours(24));
    }

    #[tokio::test]
    async fn test_missing_names_rejected_before_store() {
        let (service, store, _) = harness();
        let err = service
            .create_request(NewRequest {
                target_name: Some("  ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            VouchError::MissingFields(fields) => assert_eq!(fields, "requesterName, targetName"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_is_not_not_found() {
        let (service, _, clock) = harness();
        let id = service.create_request(input()).await.unwrap();

        clock.advance(Duration::hours(24));
        assert!(service.get_request(id.as_str()).await.is_ok());

        clock.advance(Duration::milliseconds(1));
        assert!(matches!(
            service.get_request(id.as_str()).await,
            Err(VouchError::Expired(RecordKind::Request))
        ));

        assert!(matches!(
            service.get_request("never-created").await,
            Err(VouchError::NotFound(RecordKind::Request))
        ));
    }

    #[tokio::test]
    async fn test_store_outage() {
        let (service, store, _) = harness();
        store.set_offline(true);
        assert!(matches!(
            service.create_request(input()).await,
            Err(VouchError::StoreUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_blank_id() {
        let (service, _, _) = harness();
        assert!(matches!(
            service.get_request(" ").await,
            Err(VouchError::BadRequest(_))
        ));
    }
}
