mod common;

use tempfile::TempDir;
use value_forge::{LoadError, Pipeline, PipelineConfig, Stage};

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig::default().with_log_dir(dir.path().join("logs"))
}

#[test]
fn csv_and_parquet_give_identical_results() {
    let dir = TempDir::new().unwrap();
    let values = common::sample_values(300, 1);
    let csv = common::write_csv(dir.path(), "same.csv", &values);
    let pq = common::write_parquet(dir.path(), "same.parquet", &values);

    let mut a = Pipeline::load(&csv, &config(&dir)).unwrap();
    let mut b = Pipeline::load(&pq, &config(&dir)).unwrap();
    a.run();
    b.run();

    assert!(a.completed() && b.completed());
    assert_eq!(a.results(), b.results());
    assert_eq!(a.filtered_indices(), b.filtered_indices());
}

#[test]
fn run_writes_a_log_named_after_the_input() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(dir.path(), "test_file_size_100.csv", &common::sample_values(100, 2));

    let mut p = Pipeline::load(&path, &config(&dir)).unwrap();
    p.run();
    drop(p);

    let log = std::fs::read_to_string(dir.path().join("logs/test_file_size_100.log")).unwrap();
    assert!(log.contains("INFO - File is a CSV!"));
    assert!(log.contains("Filtering data with a value less than 42"));
    assert!(log.contains("normal values detected in the generated results array"));
    assert!(log.contains("negative values!"));
}

#[test]
fn header_only_file_completes_without_results() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(dir.path(), "test_file_size_0.csv", &[]);

    let mut p = Pipeline::load(&path, &config(&dir)).unwrap();
    assert!(!p.completed());
    p.run();

    assert!(p.completed());
    assert!(p.dataset().is_empty());
    assert_eq!(p.stage(), Stage::Completed);
    assert!(p.results().is_none());

    let log = std::fs::read_to_string(dir.path().join("logs/test_file_size_0.log")).unwrap();
    assert!(log.contains("WARN - No data to process!"));
}

#[test]
fn unsupported_extension_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.txt");
    std::fs::write(&path, "value\n1\n").unwrap();

    let err = Pipeline::load(&path, &config(&dir)).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));

    let log = std::fs::read_to_string(dir.path().join("logs/values.log")).unwrap();
    assert!(log.contains("ERROR - unsupported file format"));
}

#[test]
fn corrupt_parquet_is_a_read_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.parquet");
    std::fs::write(&path, b"PAR1 but not really").unwrap();

    let err = Pipeline::load(&path, &config(&dir)).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[test]
fn fifty_and_fifty_one_rows_use_different_rule_sets() {
    let dir = TempDir::new().unwrap();
    let fifty = common::write_csv(dir.path(), "fifty.csv", &[10; 50]);
    let fifty_one = common::write_csv(dir.path(), "fifty_one.csv", &[10; 51]);

    let mut a = Pipeline::load(&fifty, &config(&dir)).unwrap();
    let mut b = Pipeline::load(&fifty_one, &config(&dir)).unwrap();
    a.run();
    b.run();

    let pass_a = &a.engine_outputs().unwrap().pass_a;
    assert_eq!(&pass_a[..5], &[10.0, 9.0, 8.0, 7.0, 6.0]);

    let pass_a = &b.engine_outputs().unwrap().pass_a;
    assert_eq!(&pass_a[..6], &[110.0, 11.0, 33.0, 11.0, 11.0, 33.0]);
}
