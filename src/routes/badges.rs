//! `/api/badge`

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde_json::json;

use super::{error_response, parse_body, query_id, success_response};
use crate::services::{BadgeSubmission, VerificationService};
use crate::types::VouchError;

/// POST /api/badge
pub async fn create(service: &VerificationService, body: &[u8]) -> Response<Full<Bytes>> {
    let submission: BadgeSubmission = match parse_body(body) {
        Ok(submission) => submission,
        Err(e) => return error_response(&e),
    };

    match service.create_badge(submission).await {
        Ok(receipt) => success_response(json!({
            "badgeId": receipt.badge_id,
            "token": receipt.token,
            "results": receipt.results,
        })),
        Err(e) => error_response(&e),
    }
}

/// GET /api/badge?id=
pub async fn fetch(service: &VerificationService, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(id) = query_id(query) else {
        return error_response(&VouchError::BadRequest("Badge ID is required".to_string()));
    };

    match service.get_badge(&id).await {
        Ok(badge) => success_response(json!({ "data": badge })),
        Err(e) => error_response(&e),
    }
}
