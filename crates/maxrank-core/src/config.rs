//! `MaxRank` run configuration.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`MAXRANK_*`)
//! 3. Configuration file (`--config maxrank.toml`)
//! 4. Default values
//!
//! With every value at its default, a run behaves exactly like the plain
//! three-argument invocation.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },

    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// How many witness vertices `cells.csv` carries per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WitnessMode {
    /// Only the first witness vertex (historical output shape).
    #[default]
    First,
    /// Every witness vertex, as a nested list.
    All,
}

/// Settings of the sampling strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproximateConfig {
    /// Number of random weight vectors drawn from the simplex.
    pub samples: usize,
    /// RNG seed; a fixed seed keeps reruns byte-identical.
    pub seed: u64,
}

impl Default for ApproximateConfig {
    fn default() -> Self {
        Self {
            samples: 4096,
            seed: 42,
        }
    }
}

/// Main run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory the artifacts are written to.
    pub output_dir: PathBuf,
    /// Field delimiter of the input files.
    pub delimiter: char,
    /// Witness serialization for vertex cells.
    pub witnesses: WitnessMode,
    /// Reject unrecognised method selectors instead of falling back.
    pub strict_method: bool,
    /// Dispatch queries on the rayon thread pool.
    pub parallel: bool,
    /// Score difference under which two records are considered tied.
    pub tolerance: f64,
    /// Sampling strategy settings.
    pub approximate: ApproximateConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            delimiter: ',',
            witnesses: WitnessMode::First,
            strict_method: false,
            parallel: false,
            tolerance: 1e-9,
            approximate: ApproximateConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads configuration from defaults and `MAXRANK_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::base())
    }

    /// Loads configuration from a TOML file, then environment variables.
    ///
    /// Unlike the implicit lookup, an explicitly named file must exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Self::env());

        Self::extract(figment)
    }

    /// Creates a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        Self::extract(figment)
    }

    fn base() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Self::env())
    }

    // `MAXRANK_APPROXIMATE__SAMPLES` maps to `approximate.samples`; a single
    // underscore stays part of the key (`MAXRANK_OUTPUT_DIR`).
    fn env() -> Env {
        Env::prefixed("MAXRANK_").split("__")
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.approximate.samples == 0 {
            return Err(ConfigError::InvalidValue {
                key: "approximate.samples".to_string(),
                message: "value must be greater than 0".to_string(),
            });
        }

        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "tolerance".to_string(),
                message: format!("value {} must be finite and positive", self.tolerance),
            });
        }

        if !self.delimiter.is_ascii() || self.delimiter == '"' {
            return Err(ConfigError::InvalidValue {
                key: "delimiter".to_string(),
                message: format!("'{}' is not a usable ASCII delimiter", self.delimiter),
            });
        }

        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII.
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}
