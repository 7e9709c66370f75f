//! Orchestrator error taxonomy
//!
//! Non-zero exit codes from the test runner or the linter are *not* errors: they are ordinary phase results
//! and flow through [`crate::orchestrator`] as exit codes. The variants here cover everything that stops a run
//! before a phase can report a code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while configuring or running the phases.
#[derive(Debug, Error, Diagnostic)]
pub enum OrchestratorError {
    /// The run-mode token is not one of the recognized values.
    #[error("1st argument is required and must be one of [TEST, SETUP_ONLY, TEST_ONLY], got '{0}'")]
    #[diagnostic(
        code(testrun::invalid_run_mode),
        help("`SETUP` and `TEST-ONLY` are accepted as short forms of SETUP_ONLY and TEST_ONLY")
    )]
    InvalidRunMode(String),

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration in '{}': {message}", path.display())]
    #[diagnostic(code(testrun::config))]
    Config { path: PathBuf, message: String },

    /// The environment reset failed.
    #[error("pre-test setup failed: {0}")]
    #[diagnostic(code(testrun::setup))]
    Setup(String),

    /// An external tool could not be started at all.
    #[error("failed to spawn '{program}': {source}")]
    #[diagnostic(code(testrun::spawn), help("check that `{program}` is installed and on PATH"))]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl OrchestratorError {
    /// Whether this error was raised before any phase could run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidRunMode(_) | Self::Config { .. })
    }
}

/// Result type for orchestrator operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
