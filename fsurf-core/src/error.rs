//! Error types for the fallible edges of the core.
//!
//! Meshing and rotation never fail. Errors only come from building grids,
//! validating sampling domains and loading configuration.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} samples for the grid shape, got {found}")]
    Shape { expected: usize, found: usize },

    #[error("grid of {rows}x{cols} exceeds the maximum vertex count")]
    TooLarge { rows: usize, cols: usize },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SamplerError {
    #[error("domain bounds must be finite, got {min}..{max}")]
    NonFiniteBounds { min: f64, max: f64 },

    #[error("domain needs at least one step")]
    NoSteps,

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        let err = GridError::Ragged {
            row: 2,
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "row 2 has 3 columns, expected 4");

        let err = GridError::Shape {
            expected: 9,
            found: 8,
        };
        assert_eq!(
            err.to_string(),
            "expected 9 samples for the grid shape, got 8"
        );
    }

    #[test]
    fn test_sampler_error_from_grid() {
        let err: SamplerError = GridError::TooLarge { rows: 1, cols: 2 }.into();
        assert!(matches!(err, SamplerError::Grid(_)));
        assert!(err.to_string().contains("1x2"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::Validation("span_x must be positive".into());
        assert_eq!(
            err.to_string(),
            "config validation error: span_x must be positive"
        );
    }
}
