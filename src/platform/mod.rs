//! Platform abstraction for the host location capability
//!
//! This module decouples the locator and watcher from the concrete source of
//! position samples: the browser's `navigator.geolocation` (behind the `web`
//! feature) or the in-memory mock used by tests and the terminal demo.

pub mod provider;
pub mod options;
pub mod mock;
pub mod error;
#[cfg(feature = "web")]
pub mod web;

pub use provider::{GeolocationProvider, PositionCallback, ErrorCallback, UpdateCallback, UpdateErrorCallback};
pub use options::PositionOptions;
pub use mock::MockGeolocation;
pub use error::PositionError;
