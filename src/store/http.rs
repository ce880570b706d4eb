//! HTTP client for the remote record store
//!
//! Wire protocol:
//!
//! - `POST {base}/records/{key}` create (409 when the key is taken)
//! - `GET  {base}/records/{key}/latest` read, answers `{"record": {...}}`
//! - `PUT  {base}/records/{key}` replace
//! - `GET  {base}/records?name=...` secondary lookup, answers `{"key": "..."}`

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{RecordStore, StoreError, StoreResult, StoredRecord};
use crate::identity::RecordId;

/// Header carrying the store API key
const API_KEY_HEADER: &str = "X-Master-Key";

/// Header carrying the secondary record name on create
const RECORD_NAME_HEADER: &str = "X-Record-Name";

/// Client configuration
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL of the store HTTP API
    pub base_url: String,
    /// Optional API key
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Deserialize)]
struct LatestEnvelope {
    record: Value,
}

#[derive(Deserialize)]
struct NameLookup {
    key: String,
}

/// Record store backed by a remote HTTP key-value service
pub struct HttpRecordStore {
    config: HttpStoreConfig,
    client: Client,
}

impl HttpRecordStore {
    /// Create a new store client
    pub fn new(config: HttpStoreConfig) -> StoreResult<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(api_key)
                .map_err(|_| StoreError::Unavailable("invalid store API key".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn record_url(&self, key: &RecordId) -> String {
        format!(
            "{}/records/{}",
            self.base(),
            urlencoding::encode(key.as_str())
        )
    }

    async fn failure(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::Unavailable(format!("store returned {}: {}", status, body))
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait::async_trait]
impl RecordStore for HttpRecordStore {
    async fn create(&self, record: StoredRecord) -> StoreResult<RecordId> {
        let url = self.record_url(&record.key);
        debug!(key = %record.key, name = %record.name, "Store create");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(RECORD_NAME_HEADER, &record.name)
            .json(&record.body)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::Conflict(record.key));
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(record.key)
    }

    async fn get(&self, key: &RecordId) -> StoreResult<Option<Value>> {
        let url = format!("{}/latest", self.record_url(key));
        debug!(key = %key, "Store get");

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let envelope: LatestEnvelope = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(envelope.record))
    }

    async fn update(&self, key: &RecordId, body: Value) -> StoreResult<bool> {
        let url = self.record_url(key);
        debug!(key = %key, "Store update");

        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(true)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<RecordId>> {
        let url = format!("{}/records?name={}", self.base(), urlencoding::encode(name));
        debug!(name = %name, "Store find by name");

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let lookup: NameLookup = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(RecordId::parse(&lookup.key))
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
