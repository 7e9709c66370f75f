//! CLI module for testrun
//!
//! ## Usage
//!
//! ```text
//! testrun [OPTIONS] [RUN_MODE] [GLOB]
//!
//! testrun TEST                    # setup, all tests, lint
//! testrun TEST example            # setup, test/example.test.js
//! testrun TEST_ONLY api/users     # test/api/users.test.js, no setup
//! testrun SETUP_ONLY              # reset the environment
//! ```
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. The run mode is taken as a raw string and
//! validated by [`RunMode`](crate::RunMode) so an unknown mode is reported like every other configuration
//! error. `execute` returns `CliResult<ExitCode>`; only the top-level `run()` function calls `process::exit`.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use miette::Diagnostic;

use crate::config::RunnerConfig;
use crate::error::OrchestratorError;
use crate::orchestrator::{Orchestrator, RunPlan};
use crate::phases::ProcessPhaseRunner;
use crate::version::TESTRUN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<OrchestratorError> for CliError {
    fn from(err: OrchestratorError) -> Self {
        // Setup failures were already reported by the orchestrator; only the exit code is left to deliver.
        if matches!(err, OrchestratorError::Setup(_)) {
            return CliError::failure("");
        }
        let mut message = format!("Error: {}", err);
        if let Some(help) = err.help() {
            message.push_str(&format!("\n  help: {}", help));
        }
        CliError::failure(message)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Orchestrates a test run: environment setup, test runner, lint
#[derive(Parser, Debug)]
#[command(name = "testrun")]
#[command(version = TESTRUN_VERSION)]
#[command(about = "Run setup, tests and lint in order, exiting with the worst result", long_about = None)]
pub struct Cli {
    /// Which phases to run: TEST, SETUP_ONLY (SETUP) or TEST_ONLY (TEST-ONLY)
    #[arg(value_name = "RUN_MODE")]
    pub mode: Option<String>,

    /// Test file to run, e.g. `example` for test/example.test.js (default: all test files)
    #[arg(value_name = "GLOB")]
    pub glob: Option<String>,

    /// JSON file overriding the default commands and glob settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never run the lint phase
    #[arg(long = "no-lint")]
    pub no_lint: bool,

    /// Print the phases that would run without spawning anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => process::exit(exit_code.0),
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    let mut plan = RunPlan::from_args(cli.mode.as_deref(), cli.glob.as_deref(), &config)?;
    if cli.no_lint {
        plan = plan.without_lint();
    }

    if cli.dry_run {
        println!("Run mode: {}", plan.mode);
        for step in plan.describe(&config) {
            println!("  {}", step);
        }
        return Ok(ExitCode::SUCCESS);
    }

    tracing::debug!(mode = %plan.mode, glob = %plan.glob, lint = plan.runs_lint(), "starting run");
    let mut orchestrator = Orchestrator::new(ProcessPhaseRunner::new(config));
    let code = orchestrator.run(&plan)?;
    Ok(ExitCode(code))
}

fn load_config(path: Option<&std::path::Path>) -> CliResult<RunnerConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Ok(RunnerConfig::load(path)?)
        }
        None => Ok(RunnerConfig::default()),
    }
}

// ============================================================================
// Tests
// ============================================================================
