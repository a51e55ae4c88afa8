//! Character cell metrics.

use serde::{Deserialize, Serialize};

/// Fallback glyph width when the sample span cannot be measured.
pub const DEFAULT_CHAR_WIDTH: f64 = 7.2;

/// Fixed line height forced by the normalization stylesheet.
pub const DEFAULT_CHAR_HEIGHT: f64 = 18.0;

/// Number of glyphs in the monospace sample span.
const SAMPLE_GLYPHS: f64 = 10.0;

/// Size of one grid cell in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharMetrics {
    pub char_width: f64,
    pub char_height: f64,
}

impl CharMetrics {
    pub fn new(char_width: f64, char_height: f64) -> Self {
        Self {
            char_width,
            char_height,
        }
    }

    /// Metrics from the measured width of a ten-glyph sample span.
    pub fn from_sample_width(sample_width: f64) -> Self {
        let char_width = sample_width / SAMPLE_GLYPHS;
        Self {
            char_width: if char_width.is_finite() && char_width > 0.0 {
                char_width
            } else {
                DEFAULT_CHAR_WIDTH
            },
            char_height: DEFAULT_CHAR_HEIGHT,
        }
    }

    /// Replace non-positive or non-finite values with the defaults.
    pub fn sanitized(self) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        Self {
            char_width: if valid(self.char_width) {
                self.char_width
            } else {
                DEFAULT_CHAR_WIDTH
            },
            char_height: if valid(self.char_height) {
                self.char_height
            } else {
                DEFAULT_CHAR_HEIGHT
            },
        }
    }

    pub fn column(&self, x: f64) -> i64 {
        (x / self.char_width).floor() as i64
    }

    pub fn row(&self, y: f64) -> i64 {
        (y / self.char_height).floor() as i64
    }

    /// Cells spanned by `width` pixels, rounded up.
    pub fn columns_spanned(&self, width: f64) -> i64 {
        (width / self.char_width).ceil() as i64
    }

    /// Rows spanned by `height` pixels, rounded up.
    pub fn rows_spanned(&self, height: f64) -> i64 {
        (height / self.char_height).ceil() as i64
    }
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self {
            char_width: DEFAULT_CHAR_WIDTH,
            char_height: DEFAULT_CHAR_HEIGHT,
        }
    }
}
