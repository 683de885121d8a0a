use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a viewer configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the viewer. Missing fields in a config file take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Mouse-look scale, radians per pixel of relative motion.
    pub sensitivity: f32,
    /// Camera translation speed, world units per second.
    pub speed: f32,
    pub window_width: u32,
    pub window_height: u32,
    /// Pace presentation to the display refresh.
    pub vsync: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            speed: 20.0,
            window_width: 800,
            window_height: 600,
            vsync: true,
        }
    }
}

impl ViewerConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded viewer config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() {
            return Err(ConfigError::Invalid {
                field: "sensitivity",
                reason: "must be finite".into(),
            });
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: format!("must be a finite non-negative number, got {}", self.speed),
            });
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid {
                field: "window_width/window_height",
                reason: "window must be at least 1x1".into(),
            });
        }
        Ok(())
    }
}
