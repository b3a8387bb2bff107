//! End-to-end tests for the `cbc-parser` binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cbc-parser"))
        .args(args)
        .env_remove("CBC_NORMAL_RANGES")
        .env_remove("CBC_OUTPUT_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run cbc-parser")
}

#[test]
fn test_edan_single_record_to_stdout() {
    let input = fixture("edan_export.csv");
    let ranges = fixture("normal_ranges.json");

    let output = run(&["edan", input.to_str().unwrap(), ranges.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stdout.ends_with(b"}\n"));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sid"], "1021");
    assert_eq!(json["wbc"]["units"], "10^3/μL");
    assert_eq!(json["wbc"]["normal_range"]["lower"], 4.0);
}

#[test]
fn test_human_multi_indented() {
    let input = fixture("human_export.tsv");

    let output = run(&[
        "human",
        input.to_str().unwrap(),
        "--multi",
        "--format",
        "json-indent",
    ]);

    assert!(output.status.success());
    assert!(output.stdout.starts_with(b"[\n\t{\n\t\t\"sample_id\": \"3310\""));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_range_document_from_environment() {
    let input = fixture("edan_export.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_cbc-parser"))
        .args(["edan", input.to_str().unwrap()])
        .env("CBC_NORMAL_RANGES", fixture("normal_ranges.json"))
        .env("CBC_OUTPUT_FORMAT", "json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["plt"]["normal_range"]["upper"], 450.0);
}

#[test]
fn test_blank_record_fails_with_status_one() {
    let input = fixture("human_export.tsv");

    let output = run(&["human", input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blank"), "stderr was: {}", stderr);
}

#[test]
fn test_missing_input_fails() {
    let output = run(&["edan", "/nonexistent/export.csv"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input file does not exist"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let output = run(&[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("edan"));
    assert!(stdout.contains("human"));
}
