//! Named thresholds and run configuration.
//!
//! Every numeric constant the classifier, filter, engine and reporter branch
//! on lives here, grouped by the component that reads it. The defaults are
//! the canonical values; a JSON config file may override any subset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, ConfigError};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// All thresholds used by a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub filter: FilterThresholds,
    pub classifier: ClassifierThresholds,
    pub pass_a: PassAThresholds,
    pub pass_b: PassBThresholds,
    pub report: ReportThresholds,
    /// Datasets with more rows than this get a size warning before generation.
    pub oversized_rows: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            filter: FilterThresholds::default(),
            classifier: ClassifierThresholds::default(),
            pass_a: PassAThresholds::default(),
            pass_b: PassBThresholds::default(),
            report: ReportThresholds::default(),
            oversized_rows: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Rows with `value < below` are recorded.
    pub below: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self { below: 42.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// `value > medium_above` is at least Medium.
    pub medium_above: f64,
    /// `value > high_above` is High.
    pub high_above: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            medium_above: 50.0,
            high_above: 100.0,
        }
    }
}

/// PassA constants. `row_split` selects between the positional rule set
/// (`n > row_split`) and the value-range rule set (`n <= row_split`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassAThresholds {
    pub row_split: usize,

    // positional rules (n > row_split)
    pub even_split: f64,
    pub even_multiplier: f64,
    pub even_offset: f64,
    pub odd_pivot: f64,
    pub odd_increment: f64,
    pub odd_decrement: f64,
    pub odd_scale: f64,

    // value-range rules (n <= row_split)
    pub small_below: f64,
    pub small_multiplier: f64,
    pub large_above: f64,
}

impl Default for PassAThresholds {
    fn default() -> Self {
        Self {
            row_split: 50,
            even_split: 10.0,
            even_multiplier: 2.0,
            even_offset: 100.0,
            odd_pivot: 100.0,
            odd_increment: 1.0,
            odd_decrement: 2.0,
            odd_scale: 3.0,
            small_below: 5.0,
            small_multiplier: 10.0,
            large_above: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassBThresholds {
    pub low_below: f64,
    pub low_shift: f64,
    pub high_above: f64,
    pub high_multiplier: f64,
    pub mid_spread: f64,
    /// How many times each row's output unit is repeated.
    pub repeat: usize,
}

impl Default for PassBThresholds {
    fn default() -> Self {
        Self {
            low_below: 50.0,
            low_shift: 10.0,
            high_above: 100.0,
            high_multiplier: 2.0,
            mid_spread: 20.0,
            repeat: 3,
        }
    }
}

/// Bands used by the distribution reporter.
///
/// The input-value bands are `> value_high`, `(value_mid, value_high)`,
/// `(value_low, value_mid)` and `< value_low`; the boundary values themselves
/// fall in no band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportThresholds {
    pub large_above: f64,
    pub small_below: f64,
    pub value_high: f64,
    pub value_mid: f64,
    pub value_low: f64,
}

impl Default for ReportThresholds {
    fn default() -> Self {
        Self {
            large_above: 1000.0,
            small_below: 10.0,
            value_high: 10.0,
            value_mid: 5.0,
            value_low: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline / batch configuration
// ---------------------------------------------------------------------------

/// Configuration shared by every pipeline a process creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory receiving one `<file stem>.log` per processed input.
    pub log_dir: PathBuf,
    pub thresholds: Thresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            thresholds: Thresholds::default(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

impl PipelineConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_dir must not be empty".into()));
        }
        if self.thresholds.pass_b.repeat == 0 {
            return Err(ConfigError::Invalid("pass_b.repeat must be > 0".into()));
        }
        if self.thresholds.classifier.medium_above > self.thresholds.classifier.high_above {
            return Err(ConfigError::Invalid(
                "classifier.medium_above must not exceed classifier.high_above".into(),
            ));
        }
        let report = &self.thresholds.report;
        if report.large_above < report.small_below {
            return Err(ConfigError::Invalid(
                "report.large_above must not be below report.small_below".into(),
            ));
        }
        Ok(())
    }
}

/// Worker-pool settings for the batch runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub workers: usize,
}

impl BatchConfig {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if self.workers == 0 {
            return Err(BatchError::ZeroWorkers);
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }
}
