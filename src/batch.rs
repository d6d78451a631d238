//! Parallel batch runner.
//!
//! Every file directly under a directory gets its own [`Pipeline`]. Paths are
//! handed to a fixed pool of worker threads over a shared channel, so idle
//! workers pick up the next file. Each worker sends a typed [`BatchOutcome`]
//! back; the calling thread is the only one that appends to the report.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use crossbeam_channel::{bounded, unbounded};
use glob::MatchOptions;

use crate::config::{BatchConfig, PipelineConfig};
use crate::error::BatchError;
use crate::pipeline::Pipeline;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of one file's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub success: bool,
    pub path: PathBuf,
    /// Why the file failed, when it did.
    pub error: Option<String>,
}

impl BatchOutcome {
    fn ok(path: PathBuf, completed: bool) -> Self {
        Self {
            success: completed,
            path,
            error: None,
        }
    }

    fn failed(path: PathBuf, error: String) -> Self {
        Self {
            success: false,
            path,
            error: Some(error),
        }
    }
}

/// All outcomes of a batch, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run one pipeline per entry of `dir` on at most `batch.workers` threads.
///
/// Blocks until every file has finished. Per-file failures are reported in
/// the returned outcomes and never abort the batch.
pub fn run_batch(
    dir: &Path,
    batch: BatchConfig,
    config: &PipelineConfig,
) -> Result<BatchReport, BatchError> {
    batch.validate()?;
    let files = discover_files(dir)?;
    log::info!("Running on {} files.", files.len());

    let config = config.clone();
    run_files(files, batch.workers, move |path| process_file(path, &config))
}

/// List every entry directly under `dir`, subdirectories included.
/// Dotfiles are skipped.
///
/// Order follows the glob walk and is not part of the contract.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        log::warn!("{} is not a directory; nothing to scan", dir.display());
    }
    let pattern = format!(
        "{}/*",
        glob::Pattern::escape(&dir.to_string_lossy()).trim_end_matches('/')
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::default()
    };
    let entries = glob::glob_with(&pattern, options).map_err(|source| BatchError::InvalidPattern {
        dir: dir.to_path_buf(),
        source,
    })?;
    entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| BatchError::Scan {
            dir: dir.to_path_buf(),
            source,
        })
}

/// Load and run one file. `Ok(completed)` on success.
pub fn process_file(path: &Path, config: &PipelineConfig) -> Result<bool> {
    let mut pipeline = Pipeline::load(path, config)?;
    pipeline.run();
    Ok(pipeline.completed())
}

/// Fan `files` out to `workers` threads running `job`, one file per call.
///
/// An error or panic from `job` becomes a failed outcome for that file only.
pub fn run_files<F>(files: Vec<PathBuf>, workers: usize, job: F) -> Result<BatchReport, BatchError>
where
    F: Fn(&Path) -> Result<bool> + Send + Sync + 'static,
{
    if workers == 0 {
        return Err(BatchError::ZeroWorkers);
    }
    if files.is_empty() {
        return Ok(BatchReport::default());
    }

    let worker_count = workers.min(files.len());
    log::info!("The maximum number of available workers is {worker_count}");

    let (file_tx, file_rx) = bounded::<PathBuf>(worker_count * 2);
    let (outcome_tx, outcome_rx) = unbounded::<BatchOutcome>();
    let job = Arc::new(job);

    let mut handles = Vec::with_capacity(worker_count);
    for worker_idx in 0..worker_count {
        let rx = file_rx.clone();
        let tx = outcome_tx.clone();
        let worker_job = Arc::clone(&job);

        let handle = thread::Builder::new()
            .name(format!("batch-worker-{worker_idx}"))
            .spawn(move || {
                for path in rx.iter() {
                    let outcome = run_isolated(worker_job.as_ref(), path);
                    if tx.send(outcome).is_err() {
                        break;
                    }
                }
            })
            .map_err(BatchError::Spawn)?;
        handles.push(handle);
    }
    // Only the workers hold these now; the channels close when they finish.
    drop(file_rx);
    drop(outcome_tx);

    let total = files.len();
    for path in files {
        if file_tx.send(path).is_err() {
            break;
        }
    }
    drop(file_tx);

    let mut report = BatchReport {
        outcomes: Vec::with_capacity(total),
    };
    for outcome in outcome_rx.iter() {
        if !outcome.success {
            log::warn!(
                "{} failed: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("run did not complete")
            );
        }
        report.outcomes.push(outcome);
    }

    for handle in handles {
        if handle.join().is_err() {
            log::error!("batch worker exited abnormally");
        }
    }

    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded().count(),
        report.failed().count()
    );
    Ok(report)
}

/// Run `job` on `path`, turning errors and panics into a failed outcome.
fn run_isolated<F>(job: &F, path: PathBuf) -> BatchOutcome
where
    F: Fn(&Path) -> Result<bool>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| job(&path))) {
        Ok(Ok(completed)) => BatchOutcome::ok(path, completed),
        Ok(Err(e)) => BatchOutcome::failed(path, format!("{e:#}")),
        Err(payload) => BatchOutcome::failed(path, panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
