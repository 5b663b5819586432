//! Runs the `cascade` binary end to end and checks its exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cascade-it-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_recipe(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("recipe.json");
    std::fs::write(&path, json).unwrap();
    path
}

fn cascade(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cascade"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

const COLLECT_THEN_COUNT: &str = r#"{
  "modules": [
    { "name": "file_collector", "args": { "paths": "@paths" } },
    { "name": "line_counter", "wants": ["file_collector"] }
  ]
}"#;

#[test]
fn run_phase_failure_exits_non_zero() {
    let dir = scratch_dir("run-abort");
    let recipe = write_recipe(&dir, COLLECT_THEN_COUNT);
    let missing = dir.join("missing.txt");

    let output = cascade(&[
        recipe.to_str().unwrap(),
        "--arg",
        &format!("paths={}", missing.display()),
    ]);

    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));

    let lines = stdout_lines(&output);
    let header = lines
        .iter()
        .position(|l| l == "cascade encountered one or more errors:")
        .unwrap();
    assert!(lines[header + 1].starts_with("  cannot read "));
    assert_eq!(lines[header + 2], "CRITICAL:   no input files found");
    assert_eq!(lines[header + 3], "Critical error found. Aborting.");
    assert_eq!(lines.len(), header + 4);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn setup_failure_exits_before_run_phase() {
    let dir = scratch_dir("setup-abort");
    let recipe = write_recipe(&dir, r#"{ "modules": [{ "name": "file_collector" }] }"#);

    let output = cascade(&[recipe.to_str().unwrap()]);

    assert!(!output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "cascade encountered one or more errors:");
    assert_eq!(
        lines[1],
        "CRITICAL:   An unknown error occurred: missing argument 'paths'"
    );
    assert_eq!(lines[2], "Critical error found. Aborting.");
    assert!(!lines.iter().any(|l| l.starts_with("Module ")));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn clean_run_exits_zero() {
    let dir = scratch_dir("clean");
    let recipe = write_recipe(&dir, COLLECT_THEN_COUNT);
    let file = dir.join("notes.txt");
    std::fs::write(&file, "one\ntwo\n").unwrap();

    let output = cascade(&[
        recipe.to_str().unwrap(),
        "--arg",
        &format!("paths={}", file.display()),
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert!(lines.contains(&"Module file_collector completed".to_string()));
    assert!(lines.contains(&"Module line_counter completed".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("CRITICAL")));
    std::fs::remove_dir_all(&dir).ok();
}
