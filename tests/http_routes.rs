//! Adapter routing through `server::route`, without a socket

use bytes::Bytes;
use clap::Parser;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use vouch::lifecycle::SystemClock;
use vouch::server::route;
use vouch::signer::PlaceholderSigner;
use vouch::store::MemoryRecordStore;
use vouch::{AppState, Args, VerificationService};

fn state() -> AppState {
    let args = Args::parse_from(["vouch", "--dev-mode"]);
    let service = VerificationService::new(
        Arc::new(MemoryRecordStore::new()),
        Arc::new(PlaceholderSigner::default()),
        Arc::new(SystemClock),
    );
    AppState::new(args, service)
}

async fn call(
    state: &AppState,
    method: Method,
    path: &str,
    query: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let bytes = if body.is_null() {
        Bytes::new()
    } else {
        Bytes::from(serde_json::to_vec(&body).unwrap())
    };
    let response = route(state, method, path, query, bytes).await;
    split(response).await
}

async fn split(response: Response<Full<Bytes>>) -> (StatusCode, Value) {
    let status = response.status();
    assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn request_verify_and_fetch_proof() {
    let state = state();

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/request",
        None,
        json!({
            "requesterName": "Jordan",
            "targetName": "Riley Park",
            "claimedHeight": "180cm",
            "claimedAge": ""
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let request_id = body["requestId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &state,
        Method::GET,
        "/api/request",
        Some(&format!("id={}", request_id)),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["claimedHeight"], "180cm");
    assert_eq!(body["data"]["claimedAge"], Value::Null);

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/verify",
        None,
        json!({
            "requestId": request_id,
            "displayName": "riley park",
            "extractedData": {"height": "180CM", "age": 31},
            "selectedFields": ["height", "age"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["heightMatch"], "match");
    assert_eq!(body["results"]["ageMatch"], "not_applicable");
    assert_eq!(body["results"]["nameMatch"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    let proof_id = body["proofId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &state,
        Method::GET,
        "/api/proof",
        Some(&format!("id={}", proof_id)),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["proofId"], proof_id.as_str());
    assert_eq!(body["data"]["isValid"], true);
}

#[tokio::test]
async fn badge_create_and_fetch() {
    let state = state();

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/badge",
        None,
        json!({
            "displayName": "Riley",
            "extractedData": {"location": "Porto"},
            "selectedFields": ["location"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["type"], "badge");
    let badge_id = body["badgeId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &state,
        Method::GET,
        "/api/badge",
        Some(&format!("id={}", badge_id)),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["selectedFields"], json!(["location"]));
}

#[tokio::test]
async fn validation_failures_are_400() {
    let state = state();

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/badge",
        None,
        json!({"extractedData": {"age": "30"}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Missing required fields: displayName, extractedData"
    );

    let (status, body) = call(&state, Method::GET, "/api/proof", None, Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Proof ID is required"));

    let response = route(
        &state,
        Method::POST,
        "/api/request",
        None,
        Bytes::from_static(b"{broken"),
    )
    .await;
    assert_eq!(split(response).await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let state = state();

    let (status, body) = call(
        &state,
        Method::GET,
        "/api/request",
        Some("id=ffffffffffffffffffffffffffffffff"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/verify",
        None,
        json!({"requestId": "ffffffffffffffffffffffffffffffff"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Original request not found");
}

#[tokio::test]
async fn method_and_path_handling() {
    let state = state();

    let (status, body) = call(&state, Method::DELETE, "/api/request", None, Value::Null).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed"}));

    let (status, _) = call(&state, Method::GET, "/api/verify", None, Value::Null).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call(&state, Method::GET, "/api/unknown", None, Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&state, Method::OPTIONS, "/api/badge", None, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn health_reports_backend_and_mode() {
    let state = state();

    let (status, body) = call(&state, Method::GET, "/health", None, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert_eq!(body["store"], "memory");
    assert_eq!(body["mode"], "development");
}
