//! Value Forge
//!
//! Loads a single `value` column from CSV or Parquet, derives a result
//! sequence from it with two rule passes, and logs distribution counts.
//! Directories of files can be processed on a bounded pool of workers.
//!
//! # Architecture
//!
//! - **data**: loading, threshold filter, Low/Medium/High classification
//! - **engine**: the PassA / PassB rule sets
//! - **report**: result and input distribution counts
//! - **pipeline**: the per-file stage machine
//! - **batch**: fan-out over a directory with per-file isolation
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use value_forge::{Pipeline, PipelineConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = PipelineConfig::default();
//!     let mut pipeline = Pipeline::load(Path::new("data/test_file_size_100.csv"), &config)?;
//!     pipeline.run();
//!     println!("{} results", pipeline.results().map_or(0, |r| r.len()));
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use batch::{run_batch, BatchOutcome, BatchReport};
pub use config::{BatchConfig, PipelineConfig, Thresholds};
pub use data::model::{ClassifiedTable, Dataset, Level};
pub use engine::{generate, EngineOutput};
pub use error::{BatchError, ConfigError, LoadError};
pub use pipeline::{Pipeline, Stage};
