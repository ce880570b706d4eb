//! `/api/request`

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde_json::json;

use super::{error_response, parse_body, query_id, success_response};
use crate::services::{NewRequest, VerificationService};
use crate::types::VouchError;

/// POST /api/request
pub async fn create(service: &VerificationService, body: &[u8]) -> Response<Full<Bytes>> {
    let input: NewRequest = match parse_body(body) {
        Ok(input) => input,
        Err(e) => return error_response(&e),
    };

    match service.create_request(input).await {
        Ok(request_id) => success_response(json!({ "requestId": request_id })),
        Err(e) => error_response(&e),
    }
}

/// GET /api/request?id=
pub async fn fetch(service: &VerificationService, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(id) = query_id(query) else {
        return error_response(&VouchError::BadRequest("Request ID is required".to_string()));
    };

    match service.get_request(&id).await {
        Ok(request) => success_response(json!({ "data": request })),
        Err(e) => error_response(&e),
    }
}
