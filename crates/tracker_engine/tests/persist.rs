use std::fs;

use tempfile::TempDir;
use tracker_engine::{ensure_output_dir, write_atomic};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("results");
    assert!(!results.exists());
    ensure_output_dir(&results).unwrap();
    assert!(results.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("results");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn atomic_write_replaces_existing_content() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("conference_events.jsonl");

    write_atomic(&target, "first\n").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "first\n");

    write_atomic(&target, "second\n").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "second\n");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_when_parent_is_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = write_atomic(&blocker.join("filter_config.json"), "{}");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
