use crate::core::{
    DEFAULT_MAP_BASE_URL, DEFAULT_MAP_ZOOM, DEFAULT_UNKNOWN_TEXT, MAX_MAP_ZOOM,
    MSG_ALREADY_WATCHING, MSG_LOCATING, MSG_NOT_SUPPORTED, MSG_UNABLE_TO_RETRIEVE,
    MSG_WATCH_FAILED,
};
use crate::platform::PositionOptions;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Options for the continuous subscription
    pub watch_options: PositionOptions,
    /// Options for one-shot requests
    pub locate_options: PositionOptions,
    /// Map deep-link parameters
    pub map: MapLinkConfig,
    /// Status text rendering
    pub display: DisplayConfig,
    /// User-facing messages
    pub messages: Messages,
}

/// Map deep-link parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLinkConfig {
    /// Base URL; the link appends `/@<lat>,<lon>,<zoom>z`
    pub base_url: String,
    /// Zoom level
    pub zoom: u8,
}

/// Status text rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rendering of optional fields the platform did not report
    pub unknown_text: String,
    /// strftime pattern for the date part of "Last seen"
    pub date_format: String,
    /// strftime pattern for the time part of "Last seen"
    pub time_format: String,
    /// Fixed UTC offset in minutes; local time when unset
    pub utc_offset_minutes: Option<i32>,
}

/// User-facing messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub locating: String,
    pub not_supported: String,
    pub unable_to_retrieve: String,
    pub watch_failed: String,
    pub already_watching: String,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read or written
    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is not valid JSON for this schema
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A parameter is out of range
    #[error("invalid configuration: {parameter} = {value} ({reason})")]
    InvalidParameter { parameter: String, value: String, reason: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watch_options: PositionOptions::tracking(),
            locate_options: PositionOptions::default(),
            map: MapLinkConfig::default(),
            display: DisplayConfig::default(),
            messages: Messages::default(),
        }
    }
}

impl Default for MapLinkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAP_BASE_URL.to_string(),
            zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unknown_text: DEFAULT_UNKNOWN_TEXT.to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%-I:%M:%S %p".to_string(),
            utc_offset_minutes: None,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            locating: MSG_LOCATING.to_string(),
            not_supported: MSG_NOT_SUPPORTED.to_string(),
            unable_to_retrieve: MSG_UNABLE_TO_RETRIEVE.to_string(),
            watch_failed: MSG_WATCH_FAILED.to_string(),
            already_watching: MSG_ALREADY_WATCHING.to_string(),
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.zoom > MAX_MAP_ZOOM {
            return Err(invalid(
                "map.zoom",
                self.map.zoom,
                &format!("must be at most {}", MAX_MAP_ZOOM),
            ));
        }

        if self.map.base_url.trim().is_empty() {
            return Err(invalid("map.base_url", &self.map.base_url, "must not be empty"));
        }

        for (parameter, options) in [
            ("watch_options.timeout_ms", &self.watch_options),
            ("locate_options.timeout_ms", &self.locate_options),
        ] {
            if options.timeout_ms == 0 {
                return Err(invalid(parameter, options.timeout_ms, "must be positive"));
            }
        }

        for (parameter, pattern) in [
            ("display.date_format", &self.display.date_format),
            ("display.time_format", &self.display.time_format),
        ] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(invalid(parameter, pattern, "not a valid strftime pattern"));
            }
        }

        if let Some(offset) = self.display.utc_offset_minutes {
            if offset.abs() >= 24 * 60 {
                return Err(invalid(
                    "display.utc_offset_minutes",
                    offset,
                    "must be within one day",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.watch_options, PositionOptions::tracking());
        assert_eq!(config.map.zoom, 20);
        assert_eq!(config.messages.not_supported, "Geolocation is not supported by your browser");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json_str(r#"{ "map": { "zoom": 15 } }"#).unwrap();
        assert_eq!(config.map.zoom, 15);
        assert_eq!(config.map.base_url, DEFAULT_MAP_BASE_URL);
        assert_eq!(config.watch_options.timeout_ms, 27_000);
        assert_eq!(config.display.unknown_text, "null");
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = AppConfig::default();
        config.display.utc_offset_minutes = Some(-480);
        config.messages.locating = "Searching".to_string();

        let json = config.to_json_pretty().unwrap();
        let parsed = AppConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let result = AppConfig::from_json_str(r#"{ "map": { "zoom": 30 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "map.zoom"
        ));
    }

    #[test]
    fn test_bad_date_pattern_rejected() {
        let mut config = AppConfig::default();
        config.display.date_format = "%Q".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "display.date_format"
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.watch_options.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            AppConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = AppConfig::load_from_file("/nonexistent/geolocator.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("geolocator-config-{}.json", std::process::id()));
        let config = AppConfig::default();
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_file(&path);
    }
}
