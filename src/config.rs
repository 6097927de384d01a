//! Layered configuration for the explorer.
//!
//! Sources, lowest priority first:
//! 1. Defaults in code
//! 2. `climate-explorer.toml` in the working directory, or an explicit file
//! 3. Environment variables with the `CLIMATE_` prefix, `__` between sections
//!    (e.g. `CLIMATE_DATASET__PATH`, `CLIMATE_ARTIFACTS__RAIN_MODEL`)
//! 4. Command-line overrides

use config::{Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    CONFIG_FILE_STEM, DEFAULT_DATASET_FILE, DEFAULT_DELIMITER, DEFAULT_HEAT_MODEL_FILE,
    DEFAULT_HEAT_SCALER_FILE, DEFAULT_RAIN_MODEL_FILE, DEFAULT_RAIN_SCALER_FILE, DEFAULT_TOP_N,
    ENV_PREFIX,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DashboardConfig {
    #[validate(nested)]
    pub dataset: DatasetConfig,

    pub artifacts: ArtifactConfig,

    /// Rows shown in each ranking
    #[validate(range(min = 1))]
    pub top_n: usize,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Observation table
    pub path: PathBuf,

    /// Field delimiter, one ASCII character
    #[validate(length(equal = 1))]
    pub delimiter: String,
}

/// Fitted scaler/classifier pairs, one per phenomenon
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    pub rain_model: PathBuf,
    pub rain_scaler: PathBuf,
    pub heat_model: PathBuf,
    pub heat_scaler: PathBuf,
}

impl DashboardConfig {
    /// Load configuration, reading `config_file` if given
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("dataset.path", DEFAULT_DATASET_FILE)?
            .set_default("dataset.delimiter", DEFAULT_DELIMITER.to_string())?
            .set_default("artifacts.rain_model", DEFAULT_RAIN_MODEL_FILE)?
            .set_default("artifacts.rain_scaler", DEFAULT_RAIN_SCALER_FILE)?
            .set_default("artifacts.heat_model", DEFAULT_HEAT_MODEL_FILE)?
            .set_default("artifacts.heat_scaler", DEFAULT_HEAT_SCALER_FILE)?
            .set_default("top_n", DEFAULT_TOP_N as u64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE_STEM).required(false)),
        };

        let config: DashboardConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.check()?;
        Ok(config)
    }

    /// Validate field constraints, including ones the derive cannot express
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        self.dataset.delimiter_byte()?;
        Ok(())
    }

    pub fn with_dataset_path(mut self, path: PathBuf) -> Self {
        self.dataset.path = path;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

impl DatasetConfig {
    /// The delimiter as the single byte the CSV reader splits on
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(DashboardError::Config(format!(
                "Delimiter must be one ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from(DEFAULT_DATASET_FILE),
                delimiter: DEFAULT_DELIMITER.to_string(),
            },
            artifacts: ArtifactConfig {
                rain_model: PathBuf::from(DEFAULT_RAIN_MODEL_FILE),
                rain_scaler: PathBuf::from(DEFAULT_RAIN_SCALER_FILE),
                heat_model: PathBuf::from(DEFAULT_HEAT_MODEL_FILE),
                heat_scaler: PathBuf::from(DEFAULT_HEAT_SCALER_FILE),
            },
            top_n: DEFAULT_TOP_N,
        }
    }
}
