//! Core data types for the geolocation front-end

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate set reported by the host location capability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Accuracy of latitude/longitude (meters)
    pub accuracy: f64,
    /// Height above the WGS84 ellipsoid (meters)
    pub altitude: Option<f64>,
    /// Accuracy of the altitude (meters)
    pub altitude_accuracy: Option<f64>,
    /// Direction of travel, clockwise from true north (degrees)
    pub heading: Option<f64>,
    /// Ground speed (m/s)
    pub speed: Option<f64>,
}

impl Coordinates {
    /// Coordinates with only the required fields present
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            altitude: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64, altitude_accuracy: f64) -> Self {
        self.altitude = Some(altitude);
        self.altitude_accuracy = Some(altitude_accuracy);
        self
    }

    pub fn with_motion(mut self, heading: f64, speed: f64) -> Self {
        self.heading = Some(heading);
        self.speed = Some(speed);
        self
    }
}

/// A single location reading, consumed immediately and never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub coords: Coordinates,
    /// Capture time (milliseconds since epoch)
    pub timestamp_ms: u64,
}

impl PositionSample {
    pub fn new(coords: Coordinates, timestamp_ms: u64) -> Self {
        Self { coords, timestamp_ms }
    }
}

/// Handle identifying a continuous position subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchId(i32);

impl WatchId {
    /// Sentinel meaning "no active subscription"
    pub const UNSET: WatchId = WatchId(-1);

    pub fn new(id: i32) -> Self {
        WatchId(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        *self != Self::UNSET
    }
}

impl Default for WatchId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
