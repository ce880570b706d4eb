//! Liveness probe
//!
//! Reports that the process is serving, which store backend it talks to,
//! and the operating mode. It does not call the store.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;
use crate::server::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    /// `memory` or `http`
    pub store: &'static str,
    pub mode: &'static str,
    pub timestamp: String,
}

fn build_health_response(state: &AppState) -> HealthResponse {
    HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        store: state.service.store_backend(),
        mode: if state.args.dev_mode {
            "development"
        } else {
            "production"
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// GET /health
pub fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    let body = serde_json::to_value(build_health_response(state)).unwrap_or_default();
    json_response(StatusCode::OK, &body)
}
