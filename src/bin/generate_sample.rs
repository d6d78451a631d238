use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write sample `value` files for exercising the pipeline.
#[derive(Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Directory for the CSV files
    #[arg(long, default_value = "./runtime_test_files")]
    csv_dir: PathBuf,

    /// Directory for the Parquet files
    #[arg(long, default_value = "./runtime_test_files_parquet")]
    parquet_dir: PathBuf,

    /// Number of files per format; file `k` has `k * step` rows
    #[arg(long, default_value_t = 101)]
    files: usize,

    #[arg(long, default_value_t = 100)]
    step: usize,

    /// Inclusive lower bound of generated values
    #[arg(long, default_value_t = -10, allow_negative_numbers = true)]
    min: i64,

    /// Exclusive upper bound of generated values
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    max: i64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `[min, max)`.
    fn range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min).max(1) as u64;
        min + (self.next_u64() % span) as i64
    }
}

fn write_csv(path: &Path, values: &[i64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["value"])?;
    for v in values {
        writer.write_record([v.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, values: &[i64]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Int64Array::from(values.to_vec()))],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.min < args.max, "--min must be below --max");

    std::fs::create_dir_all(&args.csv_dir)?;
    std::fs::create_dir_all(&args.parquet_dir)?;

    let mut rng = SimpleRng::new(args.seed);

    for k in 0..args.files {
        let rows = k * args.step;
        let values: Vec<i64> = (0..rows).map(|_| rng.range(args.min, args.max)).collect();

        let stem = format!("test_file_size_{rows}");
        write_csv(&args.csv_dir.join(format!("{stem}.csv")), &values)
            .with_context(|| format!("writing {stem}.csv"))?;
        write_parquet(&args.parquet_dir.join(format!("{stem}.parquet")), &values)
            .with_context(|| format!("writing {stem}.parquet"))?;
    }

    println!(
        "Wrote {} CSV files to {} and {} Parquet files to {}",
        args.files,
        args.csv_dir.display(),
        args.files,
        args.parquet_dir.display()
    );
    Ok(())
}
