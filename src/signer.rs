//! Record tokens
//!
//! A token is the record's JSON plus a `signature` marker, base64 encoded.
//! Anyone can decode it; there is no secret involved. The marker combines
//! the signing time with a digest of the record content, so it changes
//! whenever either does, but it proves nothing about who produced it.
//!
//! [`TokenSigner`] is the seam a keyed implementation would slot into.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::types::{Result, VouchError};

/// Key under which the marker is embedded
pub const SIGNATURE_FIELD: &str = "signature";

/// Default marker prefix
pub const DEFAULT_SIGNATURE_PREFIX: &str = "dev_mode_";

/// Hex characters of content digest kept in the marker
const DIGEST_CHARS: usize = 16;

/// Decoded token contents
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    /// Record content, without the marker
    pub claims: Value,
    /// The marker
    pub signature: String,
}

/// Attaches and reads integrity markers
pub trait TokenSigner: Send + Sync {
    /// Produce a token over `claims` (a JSON object) signed at `signed_at`
    fn sign(&self, claims: &Value, signed_at: DateTime<Utc>) -> Result<String>;

    /// Recover the payload from a token
    fn decode(&self, token: &str) -> Result<TokenPayload>;
}

/// Sign any serializable record
pub fn sign_record<T: Serialize>(
    signer: &dyn TokenSigner,
    record: &T,
    signed_at: DateTime<Utc>,
) -> Result<String> {
    let claims = serde_json::to_value(record)
        .map_err(|e| VouchError::Internal(format!("record serialization failed: {}", e)))?;
    signer.sign(&claims, signed_at)
}

/// Reversible, keyless signer
#[derive(Debug, Clone)]
pub struct PlaceholderSigner {
    prefix: String,
}

impl PlaceholderSigner {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn marker(&self, claims: &Value, signed_at: DateTime<Utc>) -> Result<String> {
        let canonical = serde_json::to_vec(claims)
            .map_err(|e| VouchError::Internal(format!("claims serialization failed: {}", e)))?;
        let digest = hex::encode(Sha256::digest(&canonical));
        Ok(format!(
            "{}{}.{}",
            self.prefix,
            signed_at.timestamp_millis(),
            &digest[..DIGEST_CHARS]
        ))
    }
}

impl Default for PlaceholderSigner {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURE_PREFIX)
    }
}

impl TokenSigner for PlaceholderSigner {
    fn sign(&self, claims: &Value, signed_at: DateTime<Utc>) -> Result<String> {
        let Value::Object(map) = claims else {
            return Err(VouchError::Internal("token claims must be a JSON object".into()));
        };

        let mut payload = map.clone();
        payload.insert(
            SIGNATURE_FIELD.to_string(),
            Value::String(self.marker(claims, signed_at)?),
        );

        let bytes = serde_json::to_vec(&payload)
            .map_err(|e| VouchError::Internal(format!("token serialization failed: {}", e)))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    fn decode(&self, token: &str) -> Result<TokenPayload> {
        let bytes = general_purpose::STANDARD
            .decode(token.trim())
            .map_err(|_| VouchError::InvalidToken)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|_| VouchError::InvalidToken)?;

        let Value::Object(mut map) = value else {
            return Err(VouchError::InvalidToken);
        };
        let signature = match map.remove(SIGNATURE_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(VouchError::InvalidToken),
        };

        Ok(TokenPayload {
            claims: Value::Object(map),
            signature,
        })
    }
}
