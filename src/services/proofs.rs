//! Proof assembly
//!
//! Loads the Request, checks it is live, compares each claim field, binds a
//! proof id, signs, and writes the Proof once. A failure at any step leaves
//! nothing behind; the single write is the last step.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::VerificationService;
use crate::compare::{compare, compare_name, is_selected, ClaimField, ExtractedData, MatchOutcome};
use crate::identity::{self, RecordId};
use crate::lifecycle::stamp;
use crate::records::{Proof, VerificationRequest};
use crate::signer::sign_record;
use crate::types::{Result, VouchError};

/// A target's submission against a Request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofSubmission {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub extracted_data: Option<ExtractedData>,
    #[serde(default)]
    pub selected_fields: Option<Vec<String>>,
}

/// What a caller gets back after assembling a Proof
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReceipt {
    pub proof_id: RecordId,
    pub token: String,
    /// The proof as signed, without its token
    pub results: Proof,
}

fn outcome(
    request: &VerificationRequest,
    extracted: &ExtractedData,
    selected_fields: &[String],
    field: ClaimField,
) -> MatchOutcome {
    compare(
        extracted.field(field.as_str()).as_deref(),
        request.claim(field),
        is_selected(selected_fields, field),
    )
}

impl VerificationService {
    /// Build, sign and store a Proof for `submission.request_id`
    pub async fn assemble_proof(&self, submission: ProofSubmission) -> Result<ProofReceipt> {
        let request_id = submission
            .request_id
            .as_deref()
            .and_then(RecordId::parse)
            .ok_or_else(|| VouchError::MissingFields("requestId".to_string()))?;

        let request: VerificationRequest = match self.load(request_id.as_str()).await {
            Ok(request) => request,
            Err(VouchError::NotFound(_)) => return Err(VouchError::RequestNotFound),
            Err(VouchError::Expired(_)) => return Err(VouchError::RequestExpired),
            Err(other) => return Err(other),
        };

        let extracted = submission.extracted_data.unwrap_or_default();
        let selected = submission.selected_fields.unwrap_or_default();
        let display_name = submission.display_name;

        let [height_match, age_match, location_match] =
            ClaimField::ALL.map(|field| outcome(&request, &extracted, &selected, field));
        let name_match = compare_name(display_name.as_deref(), Some(request.target_name.as_str()));

        let now = self.clock.now();
        let times = stamp(now);
        let proof = Proof {
            proof_id: identity::bind()?,
            request_id: request.id.clone(),
            height_match,
            age_match,
            location_match,
            name_match,
            requester_name: request.requester_name.clone(),
            target_name: request.target_name.clone(),
            extracted_data: extracted,
            display_name,
            created_at: times.created_at,
            expires_at: times.expires_at,
            is_valid: true,
            token: None,
        };

        let token = sign_record(self.signer.as_ref(), &proof, now)?;
        let signed = proof.clone().signed(token.clone());
        self.persist(&signed).await?;

        info!(
            proof_id = %proof.proof_id,
            request_id = %request.id,
            height = ?height_match,
            age = ?age_match,
            location = ?location_match,
            name = name_match,
            "Proof assembled"
        );

        Ok(ProofReceipt {
            proof_id: proof.proof_id.clone(),
            token,
            results: proof,
        })
    }

    /// Fetch a live, signed Proof
    pub async fn get_proof(&self, id: &str) -> Result<Proof> {
        let proof: Proof = self.load(id).await?;
        if proof.token().is_none() {
            return Err(VouchError::InvalidToken);
        }
        Ok(proof)
    }
}
