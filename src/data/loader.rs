use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, VALUE_COLUMN};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited text with a header row.
    Csv,
    /// Parquet columnar file.
    Parquet,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Parquet => write!(f, "Parquet"),
        }
    }
}

/// Pick the format from the file extension. Only `csv` and `parquet` match,
/// case-sensitively.
pub fn detect_format(path: &Path) -> Result<Format, LoadError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "csv" => Ok(Format::Csv),
        "parquet" => Ok(Format::Parquet),
        other => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: other.to_string(),
        }),
    }
}

/// Load the `value` column from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, a numeric column named `value`
/// * `.parquet` – a numeric field named `value` (any integer or float width)
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let format = detect_format(path)?;
    load_as(path, format)
}

/// Load with an already-detected format.
pub fn load_as(path: &Path, format: Format) -> Result<Dataset, LoadError> {
    let values = match format {
        Format::Csv => load_csv(path),
        Format::Parquet => load_parquet(path),
    }
    .map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Dataset::new(values))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one of which is `value`.
/// Other columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let value_idx = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .position(|h| h.trim() == VALUE_COLUMN)
        .with_context(|| format!("CSV missing '{VALUE_COLUMN}' column"))?;

    let mut values = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = record.get(value_idx).unwrap_or("").trim();
        let v = cell
            .parse::<f64>()
            .with_context(|| format!("Row {row_no}: '{cell}' is not a number"))?;
        values.push(v);
    }

    Ok(values)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load the `value` field of a Parquet file, widening it to `f64`.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), which stores
/// integer columns as Int64.
fn load_parquet(path: &Path) -> Result<Vec<f64>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut values = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let idx = batch
            .schema()
            .index_of(VALUE_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{VALUE_COLUMN}' column"))?;

        let column = extract_f64_column(batch.column(idx))
            .with_context(|| format!("failed to read '{VALUE_COLUMN}'"))?;
        values.extend(column);
    }

    Ok(values)
}

// -- Arrow helpers --

macro_rules! widen {
    ($col:expr, $ty:ty) => {
        $col.as_primitive::<$ty>()
            .values()
            .iter()
            .map(|v| *v as f64)
            .collect()
    };
}

/// Convert a numeric Arrow column into `f64`s. Nulls are rejected.
fn extract_f64_column(col: &ArrayRef) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        let row = (0..col.len()).find(|&i| col.is_null(i)).unwrap_or(0);
        bail!("null value at row {row}");
    }

    let values: Vec<f64> = match col.data_type() {
        DataType::Int8 => widen!(col, Int8Type),
        DataType::Int16 => widen!(col, Int16Type),
        DataType::Int32 => widen!(col, Int32Type),
        DataType::Int64 => widen!(col, Int64Type),
        DataType::UInt8 => widen!(col, UInt8Type),
        DataType::UInt16 => widen!(col, UInt16Type),
        DataType::UInt32 => widen!(col, UInt32Type),
        DataType::UInt64 => widen!(col, UInt64Type),
        DataType::Float32 => widen!(col, Float32Type),
        DataType::Float64 => widen!(col, Float64Type),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(values)
}
