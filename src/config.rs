//! Run configuration

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::split::DEFAULT_TRAINING_RUN_LENGTH;
use crate::error::ConfigError;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feature table to read
    pub input: PathBuf,
    /// Score report to write
    pub output: PathBuf,
    pub table: TableConfig,
    pub split: SplitConfig,
    pub sweep: SweepConfig,
}

/// Table parsing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Character offset of the canonical label inside the first cell of a row
    pub label_offset: usize,
}

/// Train/test split settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Leading rows of each label run assigned to training
    pub training_run_length: usize,
}

/// Hyperparameter ranges. Upper bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub neighbors_min: usize,
    pub neighbors_max: usize,
    pub features_min: usize,
    pub features_max: usize,
    pub features_step: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("features_normalized.csv"),
            output: PathBuf::from("scores.csv"),
            table: TableConfig::default(),
            split: SplitConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { label_offset: 9 }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            training_run_length: DEFAULT_TRAINING_RUN_LENGTH,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            neighbors_min: 1,
            neighbors_max: 11,
            features_min: 15,
            features_max: 511,
            features_step: 5,
        }
    }
}

impl SweepConfig {
    /// Neighbor counts to try.
    pub fn neighbor_counts(&self) -> Range<usize> {
        self.neighbors_min..self.neighbors_max
    }

    /// Selected-feature counts to try.
    pub fn feature_counts(&self) -> impl Iterator<Item = usize> {
        (self.features_min..self.features_max).step_by(self.features_step.max(1))
    }

    /// Total number of combinations the sweep will run.
    pub fn combinations(&self) -> usize {
        self.neighbor_counts().len() * self.feature_counts().count()
    }
}

impl Config {
    /// Load config from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns Ok(()) if valid, or Err describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sweep = &self.sweep;
        if sweep.neighbors_min == 0 {
            return Err(ConfigError::Invalid(
                "sweep.neighbors_min must be at least 1".to_string(),
            ));
        }
        if sweep.neighbors_min >= sweep.neighbors_max {
            return Err(ConfigError::Invalid(format!(
                "sweep neighbor range {}..{} is empty",
                sweep.neighbors_min, sweep.neighbors_max
            )));
        }
        if sweep.features_min == 0 {
            return Err(ConfigError::Invalid(
                "sweep.features_min must be at least 1".to_string(),
            ));
        }
        if sweep.features_min >= sweep.features_max {
            return Err(ConfigError::Invalid(format!(
                "sweep feature range {}..{} is empty",
                sweep.features_min, sweep.features_max
            )));
        }
        if sweep.features_step == 0 {
            return Err(ConfigError::Invalid(
                "sweep.features_step must be at least 1".to_string(),
            ));
        }
        if self.split.training_run_length == 0 {
            return Err(ConfigError::Invalid(
                "split.training_run_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
