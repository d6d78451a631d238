//! Diagnostic logging.
//!
//! Process-wide output goes through the `log` facade, initialised once with
//! [`init`]. Each pipeline additionally owns a [`RunLog`], a per-input stream
//! of timestamped lines written to an injected [`LogSink`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use log::Level;

/// `log` target that mirrors every per-run line.
pub const RUN_TARGET: &str = "value_forge::run";

const SEPARATOR_WIDTH: usize = 100;

/// Initialise process-wide logging. Honors `RUST_LOG`, defaults to `info`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for formatted per-run lines.
pub trait LogSink: Send {
    fn write_line(&self, line: &str);
}

/// Appends lines to a file, flushing per line.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<LineWriter<File>>,
}

impl FileSink {
    /// Open `<log_dir>/<stem of input>.log`, creating `log_dir` if needed.
    pub fn for_input(log_dir: &Path, input: &Path) -> Result<Self> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        Self::open(log_dir.join(format!("{stem}.log")))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            writer: Mutex::new(LineWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) {
        if let Ok(mut w) = self.writer.lock() {
            if let Err(e) = writeln!(w, "{line}") {
                log::debug!("dropping log line for {}: {e}", self.path.display());
            }
        }
    }
}

/// Keeps lines in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        if let Ok(mut l) = self.lines.lock() {
            l.push(line.to_string());
        }
    }
}

/// Discards everything.
pub struct NullSink;

impl LogSink for NullSink {
    fn write_line(&self, _line: &str) {}
}

// ---------------------------------------------------------------------------
// RunLog
// ---------------------------------------------------------------------------

/// Per-pipeline diagnostic stream.
///
/// Lines look like `2025-01-05 15:35:12,379 - INFO - message` and are also
/// forwarded to the `log` facade under [`RUN_TARGET`].
pub struct RunLog {
    name: String,
    sink: Box<dyn LogSink>,
}

impl RunLog {
    pub fn new(name: impl Into<String>, sink: impl LogSink + 'static) -> Self {
        Self {
            name: name.into(),
            sink: Box::new(sink),
        }
    }

    /// A log that only reaches the `log` facade.
    pub fn silent(name: impl Into<String>) -> Self {
        Self::new(name, NullSink)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        self.sink.write_line(&format!("{stamp} - {level} - {msg}"));
        log::log!(target: RUN_TARGET, level, "[{}] {msg}", self.name);
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, msg);
    }

    /// A row of `*` delimiting report blocks.
    pub fn separator(&self) {
        self.info("*".repeat(SEPARATOR_WIDTH));
    }
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog").field("name", &self.name).finish()
    }
}
