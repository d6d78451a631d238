#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

pub fn write_csv(dir: &Path, name: &str, values: &[i64]) -> PathBuf {
    let path = dir.join(name);
    let mut text = String::from("value\n");
    for v in values {
        text.push_str(&format!("{v}\n"));
    }
    std::fs::write(&path, text).unwrap();
    path
}

pub fn write_parquet(dir: &Path, name: &str, values: &[i64]) -> PathBuf {
    let path = dir.join(name);
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Int64Array::from(values.to_vec()))],
    )
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

/// Deterministic values in `[-10, 200)`.
pub fn sample_values(n: usize, seed: i64) -> Vec<i64> {
    (0..n as i64).map(|i| (i * 37 + seed * 11) % 210 - 10).collect()
}
