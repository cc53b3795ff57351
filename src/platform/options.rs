//! Request configuration passed to the location capability

use crate::core::{WATCH_MAXIMUM_AGE_MS, WATCH_TIMEOUT_MS};
use serde::{Deserialize, Serialize};

/// Options for a position request or subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    /// Ask the platform for its most accurate sensing
    pub enable_high_accuracy: bool,
    /// Maximum age of a cached sample the platform may return (milliseconds)
    pub maximum_age_ms: u32,
    /// Time allowed per request or update (milliseconds, `u32::MAX` for none)
    pub timeout_ms: u32,
}

impl Default for PositionOptions {
    /// Platform defaults: no high accuracy, no cached samples, no timeout
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            maximum_age_ms: 0,
            timeout_ms: u32::MAX,
        }
    }
}

impl PositionOptions {
    /// Options used for continuous tracking
    pub fn tracking() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age_ms: WATCH_MAXIMUM_AGE_MS,
            timeout_ms: WATCH_TIMEOUT_MS,
        }
    }

    pub fn has_timeout(&self) -> bool {
        self.timeout_ms != u32::MAX
    }
}
