//! End-to-end orchestration tests against real child processes
//!
//! The external tools are stood in for by `sh -c` scripts that append a marker to a log file and exit with a
//! chosen code, so both the phase order and the exit-code propagation are observed from outside.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use testrun::config::GLOB_PLACEHOLDER;
use testrun::{CommandSpec, Orchestrator, OrchestratorError, ProcessPhaseRunner, RunPlan, RunnerConfig};

/// A command that records `marker` (and its first argument) in `log`, then exits with `code`.
fn recording(log: &Path, marker: &str, code: i32) -> CommandSpec {
    let script = format!("echo \"{} $0\" >> '{}'; exit {}", marker, log.display(), code);
    CommandSpec::new("sh").args(["-c", script.as_str()])
}

fn config(log: &Path, test_code: i32, lint_code: i32) -> RunnerConfig {
    RunnerConfig::default()
        .with_setup_command(recording(log, "setup", 0))
        .with_test_command(recording(log, "tests", test_code).arg(GLOB_PLACEHOLDER))
        .with_lint_command(recording(log, "lint", lint_code))
}

fn run(config: RunnerConfig, mode: &str, glob: Option<&str>) -> Result<i32, OrchestratorError> {
    let plan = RunPlan::from_args(Some(mode), glob, &config)?;
    Orchestrator::new(ProcessPhaseRunner::new(config)).run(&plan)
}

fn log_lines(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(|l| l.split_whitespace().next().unwrap_or("").to_string())
        .collect()
}

#[test]
fn test_full_run_executes_all_phases_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    let code = run(config(&log, 0, 0), "TEST", None).unwrap();

    assert_eq!(code, 0);
    assert_eq!(log_lines(&log), vec!["setup", "tests", "lint"]);
    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("tests test/{**/*,*}.test.js"));
}

#[test]
fn test_full_run_lint_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    assert_eq!(run(config(&log, 0, 2), "TEST", None).unwrap(), 2);
}

#[test]
fn test_full_run_test_failure_takes_priority() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    assert_eq!(run(config(&log, 1, 2), "TEST", None).unwrap(), 1);
    // Lint still ran
    assert_eq!(log_lines(&log), vec!["setup", "tests", "lint"]);
}

#[test]
fn test_single_file_run_never_lints() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    assert_eq!(run(config(&log, 0, 2), "TEST", Some("example")).unwrap(), 0);
    assert_eq!(log_lines(&log), vec!["setup", "tests"]);
}

#[test]
fn test_test_only_runs_single_file_without_setup() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    assert_eq!(run(config(&log, 5, 0), "TEST-ONLY", Some("example")).unwrap(), 5);
    assert_eq!(log_lines(&log), vec!["tests"]);
    assert!(fs::read_to_string(&log).unwrap().contains("test/example.test.js"));
}

#[test]
fn test_setup_only_never_runs_tests_or_lint() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    assert_eq!(run(config(&log, 1, 1), "SETUP_ONLY", None).unwrap(), 0);
    assert_eq!(log_lines(&log), vec!["setup"]);
}

#[test]
fn test_failed_setup_stops_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let config = config(&log, 0, 0).with_setup_command(recording(&log, "setup", 3));

    let result = run(config, "TEST", None);

    assert!(matches!(result, Err(OrchestratorError::Setup(_))));
    assert_eq!(log_lines(&log), vec!["setup"]);
}

#[test]
fn test_invalid_mode_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");

    for token in ["BOGUS", "test", "SETUP-ONLY", "LINT"] {
        let result = run(config(&log, 0, 0), token, None);
        assert!(matches!(result, Err(OrchestratorError::InvalidRunMode(_))), "{token}");
    }
    assert!(!log.exists());
}

#[test]
fn test_missing_linter_keeps_test_code() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let config = config(&log, 0, 0).with_lint_command(CommandSpec::new("testrun-no-such-linter"));

    assert_eq!(run(config, "TEST", None).unwrap(), 0);
}
