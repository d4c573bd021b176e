//! Transaction deadlines.
//!
//! In memory a deadline is an absolute timestamp (milliseconds since the Unix
//! epoch). On the wire it is the number of milliseconds elapsed since the
//! network epoch constant.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The network epoch, in milliseconds since the Unix epoch (2016-03-29 UTC).
pub const NETWORK_EPOCH_MS: u64 = 1_459_468_800_000;

/// Maximum lifetime of a transaction deadline created relative to now.
const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

/// An absolute point in time a transaction must confirm by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Deadline(u64);

impl Deadline {
    /// Create a deadline `delta` from now. The delta must be strictly
    /// between zero and 24 hours.
    pub fn create(delta: Duration) -> Result<Self, ModelError> {
        if delta.is_zero() {
            return Err(ModelError::InvalidDeadline(
                "deadline delta must be positive".into(),
            ));
        }
        if delta >= MAX_DEADLINE {
            return Err(ModelError::InvalidDeadline(
                "deadline delta must be less than 24 hours".into(),
            ));
        }
        Ok(Self(now_ms() + delta.as_millis() as u64))
    }

    /// A deadline from an absolute timestamp (ms since the Unix epoch).
    pub fn from_timestamp_ms(ms: u64) -> Self {
        Self(ms)
    }

    /// Reconstruct a deadline from its wire form (ms since the network
    /// epoch).
    pub fn from_network_ms(ms: u64) -> Self {
        Self(NETWORK_EPOCH_MS + ms)
    }

    /// Absolute timestamp, ms since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.0
    }

    /// Wire form: ms elapsed since the network epoch.
    pub fn to_network_ms(&self) -> u64 {
        self.0.saturating_sub(NETWORK_EPOCH_MS)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis() as u64
}
