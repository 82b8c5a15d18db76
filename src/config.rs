//! Configuration file support for the label raster editor.
//!
//! Editor settings (alpha levels, highlight tint, color seed, log verbosity)
//! serialize to JSON so a host application can persist and restore them.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::{DEFAULT_COLOR_SEED, HIGHLIGHT_ALPHA, HIGHLIGHT_RGB, TRANSLUCENT_ALPHA};
use crate::error::Result;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Settings for a raster editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Alpha of normally rendered segment pixels
    #[serde(default = "default_translucent_alpha")]
    pub translucent_alpha: u8,

    /// Tint written over highlighted segments
    #[serde(default = "default_highlight_color")]
    pub highlight_color: [u8; 3],

    /// Alpha of highlighted segment pixels
    #[serde(default = "default_highlight_alpha")]
    pub highlight_alpha: u8,

    /// Seed for the segment color generator
    #[serde(default = "default_color_seed")]
    pub color_seed: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_translucent_alpha() -> u8 {
    TRANSLUCENT_ALPHA
}

fn default_highlight_color() -> [u8; 3] {
    HIGHLIGHT_RGB
}

fn default_highlight_alpha() -> u8 {
    HIGHLIGHT_ALPHA
}

fn default_color_seed() -> u32 {
    DEFAULT_COLOR_SEED
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            translucent_alpha: default_translucent_alpha(),
            highlight_color: default_highlight_color(),
            highlight_alpha: default_highlight_alpha(),
            color_seed: default_color_seed(),
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    pub fn highlight_rgb(&self) -> Rgb {
        Rgb::from(self.highlight_color)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. Missing fields take their defaults; a newer format
    /// version is accepted with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config version {} is newer than supported version {}; unknown fields are ignored",
                config.version,
                CONFIG_VERSION
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.translucent_alpha, 160);
        assert_eq!(config.color_seed, 114_514);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = EditorConfig {
            translucent_alpha: 120,
            highlight_color: [255, 0, 0],
            log_level: LogLevel::Debug,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"debug\""));
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "color_seed": 7 }"#).unwrap();
        assert_eq!(config.color_seed, 7);
        assert_eq!(config.highlight_alpha, HIGHLIGHT_ALPHA);
        assert_eq!(config.highlight_rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(EditorConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }
}
