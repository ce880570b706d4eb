//! Vouch - claim verification service
//!
//! A requester records claims about a target person (height, age,
//! location). The target answers with data extracted from a document and a
//! choice of which fields to disclose; Vouch compares the two and issues a
//! signed Proof. Badges are self-issued disclosures with no request behind
//! them. Every record lives for 24 hours.
//!
//! ## Routes
//!
//! - `POST /api/request`, `GET /api/request?id=`
//! - `POST /api/verify`, `GET /api/proof?id=`
//! - `POST /api/badge`, `GET /api/badge?id=`
//! - `GET /health`

pub mod compare;
pub mod config;
pub mod identity;
pub mod lifecycle;
pub mod logging;
pub mod records;
pub mod routes;
pub mod server;
pub mod services;
pub mod signer;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use services::VerificationService;
pub use types::{Result, VouchError};
