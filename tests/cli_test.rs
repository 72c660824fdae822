//! CLI contract tests
//!
//! Runs the built binary against documents written to a temp directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SAMPLE_A: &str = "The harbour was quiet when we arrived on Tuesday. \
    Fishing boats rocked against the stone wall while gulls circled overhead. \
    We found a small cafe near the market and ordered toast with honey.";

const SAMPLE_B: &str = "The valley was green when we drove in on Friday. \
    Sheep wandered across the narrow road while a farmer waved from the gate. \
    We stopped at a bakery in the village and bought warm bread.";

const SAMPLE_C: &str = "The station was busy when we left on Sunday. \
    Commuters hurried past the ticket hall while a busker played by the stairs. \
    We bought coffee from a kiosk and found seats near the window.";

fn styleprint_bin() -> &'static str {
    env!("CARGO_BIN_EXE_styleprint")
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (name, text) in [("a.txt", SAMPLE_A), ("b.txt", SAMPLE_B), ("c.txt", SAMPLE_C)] {
        std::fs::write(dir.path().join(name), text).expect("write sample");
    }
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(styleprint_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run styleprint")
}

#[test]
fn test_analyze_json() {
    let dir = workspace();
    let output = run(dir.path(), &["analyze", "a.txt", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["metrics"]["sentences"].as_array().map(Vec::len), Some(3));
    assert!(parsed["errors"]["cleanliness"].as_f64().is_some());
}

#[test]
fn test_analyze_explain_metric() {
    let dir = workspace();
    let output = run(dir.path(), &["analyze", "a.txt", "--explain", "grade"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Document Analysis"));
    assert!(stdout.contains("Grade Level"));

    let output = run(dir.path(), &["analyze", "a.txt", "--explain", "coherence"]);
    assert!(!output.status.success());
}

#[test]
fn test_profile_text() {
    let dir = workspace();
    let output = run(dir.path(), &["profile", "a.txt", "b.txt", "c.txt"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Baseline Profile"));
    assert!(stdout.contains("Samples: 3"));
}

#[test]
fn test_compare_json_with_traces() {
    let dir = workspace();
    let output = run(
        dir.path(),
        &[
            "compare", "c.txt", "-b", "a.txt", "b.txt", "--explain", "--explain-metric", "cv", "-f", "json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let score = parsed["consistency_score"].as_f64().expect("score");
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(parsed["explanations"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_compare_fail_below() {
    let dir = workspace();
    let output = run(dir.path(), &["compare", "a.txt", "-b", "a.txt", "a.txt", "a.txt", "--fail-below", "100"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--fail-below"));

    let output = run(dir.path(), &["compare", "a.txt", "-b", "a.txt", "a.txt", "a.txt", "--fail-below", "50"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_compare_writes_output_file() {
    let dir = workspace();
    let output = run(dir.path(), &["compare", "c.txt", "-b", "a.txt", "b.txt", "-o", "report.txt"]);
    assert!(output.status.success());
    let report = std::fs::read_to_string(dir.path().join("report.txt")).expect("report");
    assert!(report.contains("Style Consistency"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = workspace();
    let output = run(dir.path(), &["compare", "missing.txt", "-b", "a.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
}

#[test]
fn test_empty_document_is_rejected() {
    let dir = workspace();
    std::fs::write(dir.path().join("empty.txt"), "   \n").expect("write");
    let output = run(dir.path(), &["compare", "empty.txt", "-b", "a.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Comparison text is empty"));
}

#[test]
fn test_init_then_config_is_used() {
    let dir = workspace();
    let output = run(dir.path(), &["init"]);
    assert!(output.status.success());
    assert!(dir.path().join("styleprint.toml").exists());

    std::fs::write(dir.path().join("bad.toml"), "[significance]\nhigh = \"loud\"\n").expect("write");
    let output = run(dir.path(), &["--config", "bad.toml", "analyze", "a.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.toml"));
}
