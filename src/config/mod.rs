use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::dataset::{Dataset, DatasetError, DEFAULT_DATA};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    NoConfigDir,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Failed to write config: {0}")]
    Write(#[from] std::io::Error),
    #[error("Surface size must be positive, got {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Padding must be non-negative, got {0}")]
    InvalidPadding(f64),
    #[error("Invalid fill colour {0:?} (expected #RRGGBB or #RGB)")]
    InvalidFill(String),
    #[error("Invalid data: {0}")]
    InvalidData(#[from] DatasetError),
    #[error("Transition ({transition_ms}ms) must be shorter than the cycle interval ({interval_ms}ms)")]
    TransitionTooLong { transition_ms: u64, interval_ms: u64 },
    #[error("Radius {value} at index {index} exceeds the surface ({limit})")]
    RadiusTooLarge { index: usize, value: f64, limit: f64 },
    #[error("Selector must be a class selector like \".vis\", got {0:?}")]
    InvalidSelector(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Drawing surface width in surface units
    pub width: f64,
    pub height: f64,

    /// Outer padding of the position scale, in step units
    pub padding: f64,

    /// Circle fill colour
    pub fill: String,

    /// Initial dataset (shuffle order and radii)
    pub data: Vec<f64>,

    /// How often the dataset is reshuffled
    pub cycle_interval_ms: u64,

    /// Radius transition length; must be shorter than the interval
    pub transition_ms: u64,

    /// Containers to mount a surface into
    pub selector: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 75.0,
            padding: 1.0,
            fill: "#663399".to_string(),
            data: DEFAULT_DATA.to_vec(),
            cycle_interval_ms: 2000,
            transition_ms: 1000,
            selector: ".vis".to_string(),
        }
    }
}

impl VisConfig {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("shufflevis");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return VisConfig::default(),
        };

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring config at {}: {}", path.display(), e),
            }
            return VisConfig::default();
        }

        let config = VisConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::debug!("Could not write default config: {}", e);
        }
        config
    }

    /// Load and validate config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: VisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.padding >= 0.0) {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        if crate::theme::parse_hex_color(&self.fill).is_none() {
            return Err(ConfigError::InvalidFill(self.fill.clone()));
        }
        if !self.selector.starts_with('.') || self.selector.len() < 2 {
            return Err(ConfigError::InvalidSelector(self.selector.clone()));
        }
        // Animations must not overlap between cycles
        if self.transition_ms >= self.cycle_interval_ms {
            return Err(ConfigError::TransitionTooLong {
                transition_ms: self.transition_ms,
                interval_ms: self.cycle_interval_ms,
            });
        }
        Dataset::new(self.data.clone())?;
        let limit = self.width.max(self.height);
        if let Some((index, &value)) = self.data.iter().enumerate().find(|(_, v)| **v > limit) {
            return Err(ConfigError::RadiusTooLarge { index, value, limit });
        }
        Ok(())
    }

    pub fn dataset(&self) -> Result<Dataset, ConfigError> {
        Ok(Dataset::new(self.data.clone())?)
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}
