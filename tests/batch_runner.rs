mod common;

use std::collections::HashSet;
use std::path::PathBuf;

use tempfile::TempDir;
use value_forge::{run_batch, BatchConfig, BatchError, PipelineConfig};

fn config(logs: &TempDir) -> PipelineConfig {
    PipelineConfig::default().with_log_dir(logs.path())
}

#[test]
fn one_unreadable_file_among_nine_valid_ones() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();

    let mut expected: HashSet<PathBuf> = HashSet::new();
    for i in 0..9 {
        let values = common::sample_values(i * 25, i as i64);
        let path = if i % 2 == 0 {
            common::write_csv(data.path(), &format!("file_{i}.csv"), &values)
        } else {
            common::write_parquet(data.path(), &format!("file_{i}.parquet"), &values)
        };
        expected.insert(path);
    }
    let bad = data.path().join("broken.csv");
    std::fs::write(&bad, "value\n1\nnot-a-number\n").unwrap();
    expected.insert(bad.clone());

    let report = run_batch(data.path(), BatchConfig::new(4), &config(&logs)).unwrap();

    assert_eq!(report.len(), 10);
    assert_eq!(report.succeeded().count(), 9);
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path, bad);

    let seen: HashSet<PathBuf> = report.outcomes.iter().map(|o| o.path.clone()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn subdirectories_are_reported_as_failures() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    common::write_csv(data.path(), "a.csv", &[1, 2, 3]);
    std::fs::create_dir(data.path().join("nested")).unwrap();
    common::write_csv(&data.path().join("nested"), "hidden.csv", &[1]);

    let report = run_batch(data.path(), BatchConfig::new(2), &config(&logs)).unwrap();

    assert_eq!(report.len(), 2);
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path, data.path().join("nested"));
}

#[test]
fn dotfiles_are_not_scanned() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let a = common::write_csv(data.path(), "a.csv", &[1, 2, 3]);
    std::fs::write(data.path().join(".gitkeep"), "").unwrap();
    common::write_csv(data.path(), ".hidden.csv", &[4]);

    let discovered = value_forge::batch::discover_files(data.path()).unwrap();
    assert_eq!(discovered, vec![a.clone()]);

    let report = run_batch(data.path(), BatchConfig::new(2), &config(&logs)).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.all_succeeded());
    assert_eq!(report.outcomes[0].path, a);
}

#[test]
fn each_file_gets_its_own_log() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    for i in 0..5 {
        common::write_csv(data.path(), &format!("f{i}.csv"), &common::sample_values(60, i));
    }

    let report = run_batch(data.path(), BatchConfig::new(3), &config(&logs)).unwrap();
    assert!(report.all_succeeded());

    for i in 0..5 {
        let log = std::fs::read_to_string(logs.path().join(format!("f{i}.log"))).unwrap();
        assert!(log.contains(&format!("f{i}.csv")));
        assert!(log.contains("Run completed"));
    }
}

#[test]
fn more_workers_than_files_is_fine() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    common::write_csv(data.path(), "only.csv", &[7]);

    let report = run_batch(data.path(), BatchConfig::new(16), &config(&logs)).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.all_succeeded());
}

#[test]
fn empty_directory_yields_empty_report() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let report = run_batch(data.path(), BatchConfig::new(2), &config(&logs)).unwrap();
    assert!(report.is_empty());
}

#[test]
fn zero_workers_is_rejected() {
    let data = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let err = run_batch(data.path(), BatchConfig::new(0), &config(&logs)).unwrap_err();
    assert!(matches!(err, BatchError::ZeroWorkers));
}
