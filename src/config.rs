use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Application configuration. Every field has a default, so an empty
/// document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub features: FeatureFlags,
}

/// Which rules the contact pipeline carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Inclusive lower age bound
    pub min_age: i64,
    /// Inclusive upper age bound
    pub max_age: i64,
    /// Use the full email format check instead of the `@` check
    pub strict_email: bool,
    /// Reject contacts without a timestamp
    pub require_timestamp: bool,
    pub lowercase_email: bool,
    pub title_case_name: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 120,
            strict_email: false,
            require_timestamp: false,
            lowercase_email: true,
            title_case_name: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Log at debug level unless RUST_LOG says otherwise
    pub debug_mode: bool,
}

impl AppConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` or `.toml` file, picked by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the defaults
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Ok(Self::load(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pipeline = &self.pipeline;
        if pipeline.max_age <= 0 {
            return Err(ConfigError::Invalid(format!(
                "max_age must be positive, got {}",
                pipeline.max_age
            )));
        }
        if pipeline.min_age > pipeline.max_age {
            return Err(ConfigError::Invalid(format!(
                "min_age {} exceeds max_age {}",
                pipeline.min_age, pipeline.max_age
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => f.write_str(&json),
            Err(e) => write!(f, "Error formatting config: {}", e),
        }
    }
}
