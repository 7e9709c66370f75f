//! CLI tests: argument handling and config files through `cli::execute`

use std::fs;

use clap::Parser;
use testrun::cli::{Cli, ExitCode, execute};

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["testrun"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_invalid_mode_exits_with_failure() {
    let err = execute(cli(&["NOPE"])).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains("TEST, SETUP_ONLY, TEST_ONLY"));
}

#[test]
fn test_dry_run_spawns_nothing() {
    // The default commands (ava, npm) are not expected to exist here; a dry run must not touch them.
    assert_eq!(execute(cli(&["--dry-run"])).unwrap(), ExitCode::SUCCESS);
    assert_eq!(execute(cli(&["--dry-run", "TEST_ONLY", "example"])).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testrun.json");
    fs::write(&path, "{ not json").unwrap();

    let err = execute(cli(&["--config", path.to_str().unwrap(), "TEST"])).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains("invalid configuration"));
}

#[cfg(unix)]
#[test]
fn test_config_file_commands_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testrun.json");
    fs::write(
        &path,
        r#"{
            "test_command": { "program": "sh", "args": ["-c", "exit 0"] },
            "lint_command": { "program": "sh", "args": ["-c", "exit 6"] }
        }"#,
    )
    .unwrap();

    let code = execute(cli(&["--config", path.to_str().unwrap(), "TEST"])).unwrap();
    assert_eq!(code, ExitCode(6));

    let code = execute(cli(&["--config", path.to_str().unwrap(), "--no-lint", "TEST"])).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[cfg(unix)]
#[test]
fn test_setup_failure_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testrun.json");
    fs::write(
        &path,
        r#"{ "setup_command": { "program": "sh", "args": ["-c", "exit 9"] } }"#,
    )
    .unwrap();

    let err = execute(cli(&["--config", path.to_str().unwrap(), "SETUP_ONLY"])).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
}
