//! Error types for Vouch
//!
//! One enum covers every failure a public operation can surface. The
//! `Display` text is what callers see in the `error` field of the JSON
//! envelope, so variants that wrap internal detail keep it out of the message.

use hyper::StatusCode;
use tracing::warn;

use crate::records::RecordKind;
use crate::store::StoreError;

/// Main error type for Vouch operations
#[derive(Debug, thiserror::Error)]
pub enum VouchError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid proof token")]
    InvalidToken,

    #[error("{0} not found")]
    NotFound(RecordKind),

    #[error("Original request not found")]
    RequestNotFound,

    #[error("{0} has expired")]
    Expired(RecordKind),

    #[error("Request has expired")]
    RequestExpired,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Storage service unavailable")]
    StoreUnavailable,

    /// The OS random source failed; identifiers cannot be bound.
    #[error("Random source unavailable")]
    Entropy(String),

    #[error("Internal error")]
    Internal(String),
}

impl VouchError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) | Self::RequestNotFound => StatusCode::NOT_FOUND,
            Self::Expired(_) | Self::RequestExpired => StatusCode::GONE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::StoreUnavailable | Self::Entropy(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this is a caller-side input problem detected before any store call
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingFields(_) | Self::BadRequest(_))
    }

    /// Convert to status code and body tuple for HTTP response
    pub fn into_status_code_and_body(self) -> (StatusCode, String) {
        let status = self.status_code();
        let body = self.to_string();
        (status, body)
    }
}

impl From<StoreError> for VouchError {
    fn from(err: StoreError) -> Self {
        warn!(error = %err, "Record store call failed");
        match err {
            StoreError::Unavailable(_) => Self::StoreUnavailable,
            StoreError::Conflict(key) => Self::Internal(format!("identifier collision on {}", key)),
            StoreError::Decode(msg) => Self::Internal(msg),
        }
    }
}

impl From<serde_json::Error> for VouchError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for VouchError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type alias for Vouch operations
pub type Result<T> = std::result::Result<T, VouchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(
            VouchError::MissingFields("displayName".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(VouchError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            VouchError::NotFound(RecordKind::Proof).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(VouchError::RequestExpired.status_code(), StatusCode::GONE);
        assert_eq!(
            VouchError::StoreUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_detail_does_not_leak() {
        let err: VouchError =
            StoreError::Unavailable("connection refused to 10.0.0.7:443".into()).into();
        let (status, body) = err.into_status_code_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("10.0.0.7"));
    }

    #[test]
    fn test_kind_messages() {
        assert_eq!(VouchError::NotFound(RecordKind::Badge).to_string(), "Badge not found");
        assert_eq!(
            VouchError::Expired(RecordKind::Proof).to_string(),
            "Proof has expired"
        );
        assert!(VouchError::MissingFields("x".into()).is_validation());
        assert!(!VouchError::StoreUnavailable.is_validation());
    }
}
