//! Configuration for Vouch
//!
//! CLI arguments and environment variable handling using clap. Values are
//! read once in `main` and handed to each component at construction.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::signer::{PlaceholderSigner, DEFAULT_SIGNATURE_PREFIX};
use crate::store::{HttpRecordStore, HttpStoreConfig, MemoryRecordStore, RecordStore};
use crate::types::{Result, VouchError};

/// Log output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Vouch - claim verification service
#[derive(Parser, Debug, Clone)]
#[command(name = "vouch")]
#[command(about = "Claim verification service: requests, proofs and badges")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the remote record store (required outside dev mode)
    #[arg(long, env = "STORE_URL")]
    pub store_url: Option<String>,

    /// API key sent to the record store
    #[arg(long, env = "STORE_API_KEY")]
    pub store_api_key: Option<String>,

    /// Record store request timeout in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value = "10000")]
    pub store_timeout_ms: u64,

    /// Enable development mode (in-memory store when STORE_URL is unset)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Prefix of the placeholder token signature marker
    #[arg(long, env = "SIGNATURE_PREFIX", default_value = DEFAULT_SIGNATURE_PREFIX)]
    pub signature_prefix: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self.store_url.as_deref() {
            None if !self.dev_mode => {
                return Err("STORE_URL is required in production mode".to_string());
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                return Err(format!("STORE_URL must be an http(s) URL, got '{}'", url));
            }
            _ => {}
        }

        if self.store_timeout_ms == 0 {
            return Err("STORE_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.signature_prefix.trim().is_empty() {
            return Err("SIGNATURE_PREFIX must not be empty".to_string());
        }

        Ok(())
    }

    /// Remote store settings, if a store URL is configured
    pub fn store_config(&self) -> Option<HttpStoreConfig> {
        self.store_url.as_ref().map(|url| HttpStoreConfig {
            base_url: url.clone(),
            api_key: self.store_api_key.clone(),
            timeout: Duration::from_millis(self.store_timeout_ms),
        })
    }

    /// Build the record store: remote when configured, in-memory otherwise
    pub fn build_store(&self) -> Result<Arc<dyn RecordStore>> {
        match self.store_config() {
            Some(config) => {
                let store = HttpRecordStore::new(config).map_err(|e| {
                    VouchError::Internal(format!("record store client setup failed: {}", e))
                })?;
                Ok(Arc::new(store))
            }
            None => Ok(Arc::new(MemoryRecordStore::new())),
        }
    }

    /// Build the token signer
    pub fn build_signer(&self) -> PlaceholderSigner {
        PlaceholderSigner::new(self.signature_prefix.clone())
    }
}
