//! Phase I/O boundary
//!
//! The orchestrator sequences phases; the [`PhaseRunner`] trait performs them. Keeping the process spawning
//! behind a trait allows for:
//! - Dry-run modes
//! - Alternative tools (mocha, jest, eslint) via configuration
//! - Mocking/testing of the sequencing logic without spawning anything
//!
//! [`ProcessPhaseRunner`] is the real implementation: every child inherits the terminal's stdio, and each
//! call blocks until the child exits.

use std::process::{Command, ExitStatus};

use crate::config::{CommandSpec, RunnerConfig};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::glob::TestGlob;

/// Exit code used when a process ends without reporting one (killed by a signal).
pub const SIGNALLED_EXIT_CODE: i32 = 1;

/// Performs the three phases of a run.
pub trait PhaseRunner {
    /// Reset the test environment.
    fn setup(&mut self) -> OrchestratorResult<()>;

    /// Run the test runner against `glob` and return its exit code.
    fn run_tests(&mut self, glob: &TestGlob) -> OrchestratorResult<i32>;

    /// Run the linter and return its exit code, or `previous` when the linter could not report one.
    fn run_lint(&mut self, previous: i32) -> i32;
}

/// Spawns the configured external tools.
#[derive(Debug, Clone, Default)]
pub struct ProcessPhaseRunner {
    config: RunnerConfig,
}

impl ProcessPhaseRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

impl PhaseRunner for ProcessPhaseRunner {
    fn setup(&mut self) -> OrchestratorResult<()> {
        println!("Running Pre-test...");
        let Some(spec) = &self.config.setup_command else {
            tracing::debug!("no setup command configured, environment reset is a no-op");
            return Ok(());
        };

        let status = spawn_and_wait(spec, &spec.args, None).map_err(|e| OrchestratorError::Setup(e.to_string()))?;
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(OrchestratorError::Setup(format!(
                "'{}' exited with code {}",
                spec.program, code
            ))),
            None => Err(OrchestratorError::Setup(format!(
                "'{}' was terminated by a signal",
                spec.program
            ))),
        }
    }

    fn run_tests(&mut self, glob: &TestGlob) -> OrchestratorResult<i32> {
        println!("Running Tests...");
        println!("Testing files: {}", glob);

        let spec = &self.config.test_command;
        let args = spec.args_with_glob(glob.as_str());
        let status = spawn_and_wait(spec, &args, self.config.test_context_env.as_ref())?;

        Ok(status.code().unwrap_or_else(|| {
            tracing::warn!(program = %spec.program, "test runner terminated without an exit code");
            SIGNALLED_EXIT_CODE
        }))
    }

    fn run_lint(&mut self, previous: i32) -> i32 {
        println!("linting...");

        let spec = &self.config.lint_command;
        match spawn_and_wait(spec, &spec.args, None) {
            Ok(status) => status.code().unwrap_or_else(|| {
                tracing::warn!(program = %spec.program, "linter terminated without an exit code");
                previous
            }),
            Err(e) => {
                tracing::warn!("{}; keeping previous exit code {}", e, previous);
                previous
            }
        }
    }
}

/// Spawn `spec` with inherited stdio and block until it exits.
fn spawn_and_wait(
    spec: &CommandSpec,
    args: &[String],
    context_env: Option<&(String, String)>,
) -> OrchestratorResult<ExitStatus> {
    tracing::info!(command = %spec.display_with(args), "spawning");

    let mut command = Command::new(&spec.program);
    command.args(args);
    for (key, value) in spec.env.iter().chain(context_env) {
        command.env(key, value);
    }

    let status = command.status().map_err(|source| OrchestratorError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    tracing::debug!(program = %spec.program, ?status, "process exited");
    Ok(status)
}
