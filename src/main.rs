use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use value_forge::logging;
use value_forge::{run_batch, BatchConfig, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "value-forge")]
#[command(about = "Derive rule-based results from single-column numeric files", long_about = None)]
struct Cli {
    /// JSON configuration file (thresholds, log directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the per-file log directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline on one file
    Run {
        /// CSV or Parquet file with a `value` column
        file: PathBuf,
    },

    /// Run the pipeline on every file in a directory
    Batch {
        /// Directory whose direct entries are processed
        dir: PathBuf,

        /// Maximum number of files processed concurrently
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

fn main() -> Result<ExitCode> {
    logging::init();

    let cli = Cli::parse();
    let config = load_config(cli.config, cli.log_dir)?;

    match cli.command {
        Commands::Run { file } => run_command(file, &config),
        Commands::Batch { dir, workers } => batch_command(dir, workers, &config),
    }
}

fn load_config(path: Option<PathBuf>, log_dir: Option<PathBuf>) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(p) => PipelineConfig::from_file(&p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = log_dir {
        config = config.with_log_dir(dir);
    }
    config.validate()?;
    Ok(config)
}

fn run_command(file: PathBuf, config: &PipelineConfig) -> Result<ExitCode> {
    let mut pipeline = Pipeline::load(&file, config)?;
    pipeline.run();

    println!("File:      {}", file.display());
    println!("Rows:      {}", pipeline.dataset().len());
    println!("Completed: {}", pipeline.completed());
    if let Some(indices) = pipeline.filtered_indices() {
        println!("Filtered:  {} rows below {}", indices.len(), config.thresholds.filter.below);
    }
    if let Some(out) = pipeline.engine_outputs() {
        println!(
            "Results:   {} values (PassA {}, PassB {})",
            out.len(),
            out.pass_a.len(),
            out.pass_b.len()
        );
    }
    if let Some(d) = pipeline.result_distribution() {
        println!("           large {}, small {}, normal {}", d.large, d.small, d.normal);
    }

    Ok(ExitCode::SUCCESS)
}

fn batch_command(
    dir: PathBuf,
    workers: Option<usize>,
    config: &PipelineConfig,
) -> Result<ExitCode> {
    let batch = workers.map(BatchConfig::new).unwrap_or_default();
    let start = std::time::Instant::now();
    let report = run_batch(&dir, batch, config)?;

    for outcome in &report.outcomes {
        let status = if outcome.success { "ok  " } else { "FAIL" };
        match &outcome.error {
            Some(e) => println!("{status} {}  ({e})", outcome.path.display()),
            None => println!("{status} {}", outcome.path.display()),
        }
    }
    println!(
        "{} files, {} failed, {:.2}s",
        report.len(),
        report.failed().count(),
        start.elapsed().as_secs_f64()
    );

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
