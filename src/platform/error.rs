//! Position request failures reported by the platform

/// Failure of a one-shot request or of a subscription delivery
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The user or the host refused access to the location
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The location could not be determined
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    /// No sample arrived within the configured timeout
    #[error("timed out: {0}")]
    Timeout(String),
}

impl PositionError {
    /// Build an error from a W3C `GeolocationPositionError` code.
    /// Codes outside 1..=3 are treated as an unavailable position.
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => PositionError::PermissionDenied(message),
            3 => PositionError::Timeout(message),
            _ => PositionError::PositionUnavailable(message),
        }
    }

    /// W3C `GeolocationPositionError` code
    pub fn code(&self) -> u16 {
        match self {
            PositionError::PermissionDenied(_) => 1,
            PositionError::PositionUnavailable(_) => 2,
            PositionError::Timeout(_) => 3,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PositionError::PermissionDenied(message)
            | PositionError::PositionUnavailable(message)
            | PositionError::Timeout(message) => message,
        }
    }
}
