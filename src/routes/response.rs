//! JSON response envelope
//!
//! Success: `{"success": true, ...fields}`.
//! Failure: `{"success": false, "error": "<message>"}` with the status from
//! [`VouchError::status_code`].

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};

use crate::types::VouchError;

/// Build a JSON response with CORS headers
pub fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    let bytes = serde_json::to_vec(body).unwrap_or_default();

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-cache")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(bytes)))
        .unwrap_or_else(|_| {
            let mut fallback = Response::new(Full::new(Bytes::from(
                r#"{"success":false,"error":"Internal error"}"#,
            )));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

/// 200 with `success: true` merged into `fields`
pub fn success_response(fields: Value) -> Response<Full<Bytes>> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    if let Value::Object(map) = fields {
        body.extend(map);
    }
    json_response(StatusCode::OK, &Value::Object(body))
}

/// Failure envelope for `err`
pub fn error_response(err: &VouchError) -> Response<Full<Bytes>> {
    let status = err.status_code();
    if status.is_server_error() {
        error!(status = status.as_u16(), error = ?err, "Request failed");
    } else if err.is_validation() {
        debug!(status = status.as_u16(), error = %err, "Request rejected");
    } else {
        info!(status = status.as_u16(), error = %err, "Request not served");
    }

    // 405 keeps the bare shape the handlers have always used
    let body = if matches!(err, VouchError::MethodNotAllowed) {
        json!({ "error": err.to_string() })
    } else {
        json!({ "success": false, "error": err.to_string() })
    };
    json_response(status, &body)
}

/// CORS preflight response
pub fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = json_response(StatusCode::OK, &Value::Null);
    *response.body_mut() = Full::new(Bytes::new());
    let headers = response.headers_mut();
    headers.remove("Content-Type");
    headers.insert(
        "Access-Control-Allow-Methods",
        hyper::header::HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        hyper::header::HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Not found response for unknown paths
pub fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &json!({
            "success": false,
            "error": "Not Found",
            "path": path,
        }),
    )
}
