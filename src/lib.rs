//! Geolocation front-end
//!
//! Surfaces the host device's location to a user: one-shot lookup,
//! continuous tracking and stop-tracking, rendered as status text plus a
//! map link.

pub mod core;
pub mod platform;
pub mod api;
pub mod utils;
pub mod logging;

// Re-export commonly used types
pub use core::{Coordinates, PositionSample, WatchId};
pub use platform::{GeolocationProvider, MockGeolocation, PositionError, PositionOptions};
pub use api::{
    Geolocator, OneShotLocator, ContinuousWatcher, ApiResult, ApiError, WatchState,
    StartOutcome, DisplaySurface, MemoryDisplay, PositionFormatter, FormattedPosition,
    MapLink, JsonFormatter,
};
pub use utils::{AppConfig, ConfigError};
