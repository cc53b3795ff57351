//! Common API types

use crate::core::WatchId;
use crate::platform::PositionError;
use crate::utils::ConfigError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The host exposes no location capability
    #[error("geolocation is not supported on this host")]
    Unsupported,
    /// The platform failed to produce a position
    #[error("position request failed: {0}")]
    Position(#[from] PositionError),
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Lifecycle of the continuous subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchState {
    /// No subscription registered
    #[default]
    Idle,
    /// Subscription registered under the given handle
    Active(WatchId),
}

impl WatchState {
    /// Handle of the subscription, or the sentinel when idle
    pub fn handle(&self) -> WatchId {
        match self {
            WatchState::Idle => WatchId::UNSET,
            WatchState::Active(id) => *id,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, WatchState::Active(_))
    }
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new subscription was registered
    Started(WatchId),
    /// A subscription was already running; nothing changed
    AlreadyWatching(WatchId),
}

impl StartOutcome {
    pub fn handle(&self) -> WatchId {
        match self {
            StartOutcome::Started(id) | StartOutcome::AlreadyWatching(id) => *id,
        }
    }
}
