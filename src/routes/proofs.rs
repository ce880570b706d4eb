//! `/api/verify` and `/api/proof`

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde_json::json;

use super::{error_response, parse_body, query_id, success_response};
use crate::services::{ProofSubmission, VerificationService};
use crate::types::VouchError;

/// POST /api/verify
pub async fn verify(service: &VerificationService, body: &[u8]) -> Response<Full<Bytes>> {
    let submission: ProofSubmission = match parse_body(body) {
        Ok(submission) => submission,
        Err(e) => return error_response(&e),
    };

    match service.assemble_proof(submission).await {
        Ok(receipt) => success_response(json!({
            "proofId": receipt.proof_id,
            "token": receipt.token,
            "results": receipt.results,
        })),
        Err(e) => error_response(&e),
    }
}

/// GET /api/proof?id=
pub async fn fetch(service: &VerificationService, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(id) = query_id(query) else {
        return error_response(&VouchError::BadRequest("Proof ID is required".to_string()));
    };

    match service.get_proof(&id).await {
        Ok(proof) => success_response(json!({ "data": proof })),
        Err(e) => error_response(&e),
    }
}
