//! Record lifecycle: creation stamps, fixed TTL and expiry checks
//!
//! Requests, Proofs and Badges all live for the same fixed window from their
//! own creation time. Nothing is deleted when the window closes; readers
//! check liveness on every fetch and report `Expired` instead of the data.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Mutex;

/// Time-to-live applied to every record kind (24 hours)
pub const TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// TTL as a chrono duration
pub fn ttl() -> Duration {
    Duration::milliseconds(TTL_MILLIS)
}

/// Creation and expiry instants for a new record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Stamp a record created at `now`.
///
/// Timestamps are truncated to milliseconds, the precision they are stored
/// with, so a freshly built record compares equal to its stored form.
pub fn stamp(now: DateTime<Utc>) -> Stamp {
    let created_at = now.trunc_subsecs(3);
    Stamp {
        created_at,
        expires_at: created_at + ttl(),
    }
}

/// Anything carrying an expiry instant
pub trait Expiring {
    fn expires_at(&self) -> DateTime<Utc>;
}

/// A record is expired strictly after its expiry instant.
pub fn is_expired<R: Expiring + ?Sized>(record: &R, now: DateTime<Utc>) -> bool {
    now > record.expires_at()
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used by tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Move forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
