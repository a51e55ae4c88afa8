//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Width of one monospace glyph in pixels.
    #[serde(default = "default_char_width")]
    pub char_width: f64,

    /// Line height in pixels.
    #[serde(default = "default_char_height")]
    pub char_height: f64,

    /// Pixels captured below the viewport.
    #[serde(default = "default_overflow_buffer")]
    pub overflow_buffer: f64,

    /// Viewport used when a snapshot does not record one.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            char_width: default_char_width(),
            char_height: default_char_height(),
            overflow_buffer: default_overflow_buffer(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

fn default_char_width() -> f64 {
    7.2
}

fn default_char_height() -> f64 {
    18.0
}

fn default_overflow_buffer() -> f64 {
    200.0
}

fn default_viewport_width() -> f64 {
    1280.0
}

fn default_viewport_height() -> f64 {
    720.0
}

/// Backdrop detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_min_z_index")]
    pub min_z_index: i32,

    /// Fraction of each viewport dimension a backdrop covers.
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,

    /// Containers with at least this many visible characters are dialogs.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_z_index: default_min_z_index(),
            min_coverage: default_min_coverage(),
            max_text_len: default_max_text_len(),
        }
    }
}

fn default_min_z_index() -> i32 {
    100
}

fn default_min_coverage() -> f64 {
    0.9
}

fn default_max_text_len() -> usize {
    5
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Emit JSON lines to the log file.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
