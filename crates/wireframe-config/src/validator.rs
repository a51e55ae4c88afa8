//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fail with the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::invalid(error.path, error.message)),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_render(config, &mut result);
        Self::validate_overlay(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_render(config: &Config, result: &mut ValidationResult) {
        let render = &config.render;
        let positive = [
            ("render.char_width", render.char_width),
            ("render.char_height", render.char_height),
            ("render.viewport_width", render.viewport_width),
            ("render.viewport_height", render.viewport_height),
        ];
        for (path, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                result.add_error(ValidationError::new(path, "must be a positive number"));
            }
        }

        if !(render.overflow_buffer.is_finite() && render.overflow_buffer >= 0.0) {
            result.add_error(ValidationError::new(
                "render.overflow_buffer",
                "must be zero or positive",
            ));
        }

        if render.char_height.is_finite() && (render.char_height - 18.0).abs() > 6.0 {
            result.add_warning(ValidationWarning::new(
                "render.char_height",
                format!(
                    "char_height {} is far from the 18px line height the page is normalized to",
                    render.char_height
                ),
            ));
        }

        if render.char_width.is_finite() && render.char_width > 0.0 && render.char_width < 3.0 {
            result.add_warning(ValidationWarning::new(
                "render.char_width",
                "char_width below 3px produces very wide grids",
            ));
        }
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        let overlay = &config.overlay;
        if !(overlay.min_coverage > 0.0 && overlay.min_coverage <= 1.0) {
            result.add_error(ValidationError::new(
                "overlay.min_coverage",
                "min_coverage must be in (0, 1]",
            ));
        }

        if overlay.max_text_len == 0 {
            result.add_warning(ValidationWarning::new(
                "overlay.max_text_len",
                "max_text_len = 0 disables overlay suppression",
            ));
        }

        if overlay.min_coverage > 0.0 && overlay.min_coverage < 0.5 {
            result.add_warning(ValidationWarning::new(
                "overlay.min_coverage",
                "coverage below 0.5 may suppress ordinary sticky headers",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim();
        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        } else if !level.contains('=')
            && !KNOWN_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    level, KNOWN_LEVELS
                ),
            ));
        }

        if let Some(dir) = &config.logging.directory {
            if dir.exists() && !dir.is_dir() {
                result.add_error(ValidationError::new(
                    "logging.directory",
                    format!("{:?} exists and is not a directory", dir),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
