//! Fixed rendering parameters and user-facing messages

/// Map service the position link points at
pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.com/maps";

/// Zoom level embedded in every map link
pub const DEFAULT_MAP_ZOOM: u8 = 20;

/// Highest zoom level the map service accepts
pub const MAX_MAP_ZOOM: u8 = 21;

/// Maximum acceptable age of a cached sample while watching (milliseconds)
pub const WATCH_MAXIMUM_AGE_MS: u32 = 30_000;

/// Per-update timeout while watching (milliseconds)
pub const WATCH_TIMEOUT_MS: u32 = 27_000;

pub const MSG_LOCATING: &str = "Locating…";
pub const MSG_NOT_SUPPORTED: &str = "Geolocation is not supported by your browser";
pub const MSG_UNABLE_TO_RETRIEVE: &str = "Unable to retrieve your location";
pub const MSG_WATCH_FAILED: &str = "Sorry, no position available.";
pub const MSG_ALREADY_WATCHING: &str = "Already watching!";

/// Rendering of an optional field the platform did not report
pub const DEFAULT_UNKNOWN_TEXT: &str = "null";

/// Rendering of a timestamp that cannot be turned into a date
pub const INVALID_DATE_TEXT: &str = "Invalid Date";
