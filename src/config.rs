use crate::units::formatter::{UnitPreferences, DEFAULT_DECIMALS};
use crate::units::types::Family;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "paperspec.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    // Output formatting
    #[serde(default)]
    pub display: DisplayConfig,

    // Spec-sheet normalization switches
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    // Per-family overrides, keyed by family name
    #[serde(default)]
    pub families: HashMap<Family, u32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            families: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Treat a reading of exactly zero as "no reading" and drop the field.
    #[serde(default)]
    pub zero_as_absent: bool,
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Loads `path` if given, else `paperspec.toml` from `dir` when present,
    /// else the defaults.
    pub fn discover<P: AsRef<Path>>(path: Option<&Path>, dir: P) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        let candidate = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            log::debug!("using config {}", candidate.display());
            Self::load_from_file(candidate)
        } else {
            Ok(Self::empty())
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unit_preferences(&self) -> UnitPreferences {
        UnitPreferences {
            decimals: self.display.decimals,
            families: self.display.families.clone(),
        }
    }
}
