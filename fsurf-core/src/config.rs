//! TOML configuration for surface framing and drag rotation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::controller::RotationSettings;
use crate::error::ConfigError;
use crate::mesh::Framing;

/// Viewer settings. Missing fields fall back to the built-in defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub framing: Framing,
    pub rotation: RotationSettings,
}

/// Parse a config from TOML text.
///
/// A config that parses but fails [`validate`] is replaced by the defaults,
/// with a warning.
pub fn load_from_str(content: &str) -> Result<ViewConfig, ConfigError> {
    let config: ViewConfig = toml::from_str(content)?;

    if let Err(e) = validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(ViewConfig::default());
    }

    Ok(config)
}

/// Load a config from a TOML file.
pub fn load_from_path(path: &Path) -> Result<ViewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

pub fn validate(config: &ViewConfig) -> Result<(), ConfigError> {
    let framing = &config.framing;
    for (name, span) in [
        ("span_x", framing.span_x),
        ("span_y", framing.span_y),
        ("span_z", framing.span_z),
    ] {
        if !span.is_finite() || span <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "framing.{name} must be a positive number, got {span}"
            )));
        }
    }

    let rotation = &config.rotation;
    for (name, value) in [
        ("initial_yaw", rotation.initial_yaw),
        ("initial_pitch", rotation.initial_pitch),
        ("degrees_per_pixel", rotation.degrees_per_pixel),
    ] {
        if !value.is_finite() {
            return Err(ConfigError::Validation(format!(
                "rotation.{name} must be finite, got {value}"
            )));
        }
    }

    Ok(())
}

/// Documented default config, suitable for writing to disk.
pub fn default_config_toml() -> String {
    let defaults = ViewConfig::default();
    format!(
        r#"# fsurf viewer configuration

# Rendered extent of each source axis. x and y are the function inputs,
# z is the function output (drawn as height).
[framing]
span_x = {:?}
span_y = {:?}
span_z = {:?}

# Drag rotation, in degrees.
[rotation]
initial_yaw = {:?}
initial_pitch = {:?}
degrees_per_pixel = {:?}
"#,
        defaults.framing.span_x,
        defaults.framing.span_y,
        defaults.framing.span_z,
        defaults.rotation.initial_yaw,
        defaults.rotation.initial_pitch,
        defaults.rotation.degrees_per_pixel,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = load_from_str("").unwrap();
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = load_from_str(
            r#"
            [rotation]
            degrees_per_pixel = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.rotation.degrees_per_pixel, 1.5);
        assert_eq!(config.rotation.initial_yaw, -35.0);
        assert_eq!(config.framing, Framing::default());
    }

    #[test]
    fn test_invalid_values_fall_back_to_default() {
        let config = load_from_str("[framing]\nspan_z = -1.0\n").unwrap();
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_validate_reports_field() {
        let mut config = ViewConfig::default();
        config.framing.span_y = 0.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("framing.span_y"));
    }

    #[test]
    fn test_parse_error() {
        let err = load_from_str("[framing\nspan_x = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_default_template_round_trips() {
        let config = load_from_str(&default_config_toml()).unwrap();
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[framing]\nspan_x = 5.0").unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.framing.span_x, 5.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
