//! Position output formatting
//!
//! Turns a position sample into the multi-line status text and the map
//! deep-link shown to the user, plus a JSON form for diagnostics.

use crate::core::{Coordinates, PositionSample, INVALID_DATE_TEXT};
use crate::utils::{AppConfig, DisplayConfig, MapLinkConfig};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Map deep-link shown next to the status text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub href: String,
    pub label: String,
}

impl MapLink {
    /// Link with empty href and label
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.href.is_empty() && self.label.is_empty()
    }
}

/// Rendered form of one position sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPosition {
    pub status_text: String,
    pub map_link: MapLink,
}

/// Converts position samples into display content
#[derive(Debug, Clone, Default)]
pub struct PositionFormatter {
    map: MapLinkConfig,
    display: DisplayConfig,
}

impl PositionFormatter {
    /// Create a formatter with default map and display settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            map: config.map.clone(),
            display: config.display.clone(),
        }
    }

    /// Set the zoom level of generated map links
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.map.zoom = zoom;
        self
    }

    /// Render dates at a fixed UTC offset instead of local time
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.display.utc_offset_minutes = Some(minutes);
        self
    }

    /// Format a sample into status text and map link
    pub fn format(&self, sample: &PositionSample) -> FormattedPosition {
        FormattedPosition {
            status_text: self.status_text(sample),
            map_link: self.map_link(&sample.coords),
        }
    }

    /// Multi-line status text with capture time and the optional fields
    pub fn status_text(&self, sample: &PositionSample) -> String {
        let coords = &sample.coords;
        format!(
            "Last seen {}\n  Accuracy: {}\n  Altitude: {}\n  AltitudeAccuracy: {}\n  Heading: {}\n  Speed: {}",
            self.format_timestamp(sample.timestamp_ms),
            format_number(coords.accuracy),
            self.format_optional(coords.altitude),
            self.format_optional(coords.altitude_accuracy),
            self.format_optional(coords.heading),
            self.format_optional(coords.speed),
        )
    }

    /// Map link at the configured zoom; coordinates are not range-checked
    pub fn map_link(&self, coords: &Coordinates) -> MapLink {
        let latitude = format_number(coords.latitude);
        let longitude = format_number(coords.longitude);

        MapLink {
            href: format!(
                "{}/@{},{},{}z",
                self.map.base_url.trim_end_matches('/'),
                latitude,
                longitude,
                self.map.zoom
            ),
            label: format!("Latitude: {} °, Longitude: {} °", latitude, longitude),
        }
    }

    /// "<date> <time>" in the configured zone
    pub fn format_timestamp(&self, timestamp_ms: u64) -> String {
        let Some(utc) = i64::try_from(timestamp_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
        else {
            return INVALID_DATE_TEXT.to_string();
        };

        let zone = self
            .display
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60));

        let rendered = match zone {
            Some(offset) => self.render_date_time(&utc.with_timezone(&offset)),
            None => self.render_date_time(&utc.with_timezone(&Local)),
        };
        rendered.unwrap_or_else(|| INVALID_DATE_TEXT.to_string())
    }

    fn render_date_time<Tz: TimeZone>(&self, when: &DateTime<Tz>) -> Option<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        // Writing instead of to_string: a bad pattern yields fmt::Error rather than a panic
        let mut out = String::new();
        write!(
            out,
            "{} {}",
            when.format(&self.display.date_format),
            when.format(&self.display.time_format)
        )
        .ok()?;
        Some(out)
    }

    fn format_optional(&self, value: Option<f64>) -> String {
        match value {
            Some(value) => format_number(value),
            None => self.display.unknown_text.clone(),
        }
    }
}

/// Shortest decimal form of a number, the way the browser prints it.
/// Magnitudes below 1e-6 or from 1e21 up use exponent form (`1e-7`, `1e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if value.abs() < 1e-6 || value.abs() >= 1e21 {
        let rendered = format!("{:e}", value);
        match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => rendered,
        }
    } else {
        format!("{}", value)
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pretty-printing JSON formatter
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Format a sample as a JSON string
    pub fn format_json(&self, sample: &PositionSample) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(sample)
        } else {
            serde_json::to_string(sample)
        }
    }
}
