//! HTTP route handlers for Vouch
//!
//! Each handler takes the already-collected body or query string, calls the
//! verification service, and renders the JSON envelope.

pub mod badges;
pub mod health;
pub mod proofs;
pub mod requests;
mod response;

pub use health::health_check;
pub use response::{
    error_response, json_response, not_found_response, preflight_response, success_response,
};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::types::{Result, VouchError};

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// The `id` query parameter, if present and non-blank
pub(crate) fn query_id(query: Option<&str>) -> Option<String> {
    let parsed: IdQuery = serde_urlencoded::from_str(query?).ok()?;
    parsed.id.filter(|id| !id.trim().is_empty())
}

/// Decode a JSON request body
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(VouchError::BadRequest("request body is required".to_string()));
    }
    Ok(serde_json::from_slice(body)?)
}
