use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a path into a [`Dataset`](crate::data::model::Dataset).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The extension is neither a delimited text table nor Parquet.
    #[error("unsupported file format '.{extension}': {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The format is supported but reading it failed.
    #[error("error reading {}: {source:#}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::UnsupportedFormat { path, .. } | LoadError::Read { path, .. } => path,
        }
    }
}

/// Failure of the batch call itself. Per-file failures never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("worker count must be greater than zero")]
    ZeroWorkers,

    #[error("invalid scan pattern for {}: {source}", dir.display())]
    InvalidPattern {
        dir: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to list {}: {source}", dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: glob::GlobError,
    },

    #[error("failed to spawn batch worker: {0}")]
    Spawn(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
