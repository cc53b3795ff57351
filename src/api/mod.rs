//! Front-end operations and rendering
//!
//! This module holds the one-shot locator, the continuous watcher, the
//! position formatter they share, and the display surface they render into.

pub mod app;
pub mod formatting;
pub mod locator;
pub mod surface;
pub mod types;
pub mod watcher;

pub use types::{ApiResult, ApiError, WatchState, StartOutcome};
pub use app::Geolocator;
pub use locator::OneShotLocator;
pub use watcher::ContinuousWatcher;
pub use surface::{DisplaySurface, DisplaySnapshot, MemoryDisplay};
pub use formatting::{PositionFormatter, FormattedPosition, MapLink, JsonFormatter};
