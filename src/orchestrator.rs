//! Run orchestration
//!
//! ## Phase order
//!
//! | mode         | setup | tests | lint                        | exit code                     |
//! |--------------|-------|-------|-----------------------------|-------------------------------|
//! | `TEST`       | yes   | yes   | only for the catch-all glob | first non-zero of tests, lint |
//! | `SETUP_ONLY` | yes   | no    | no                          | 0                             |
//! | `TEST_ONLY`  | no    | yes   | no                          | tests                         |
//!
//! Phases run strictly one after another. A setup failure stops the run and surfaces as an error, which the
//! CLI turns into exit code 1.

use crate::config::RunnerConfig;
use crate::error::OrchestratorResult;
use crate::glob::TestGlob;
use crate::mode::RunMode;
use crate::phases::PhaseRunner;

/// What a run will do, resolved from the invocation arguments before anything is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub mode: RunMode,
    pub glob: TestGlob,
    /// Set when lint was switched off explicitly (`--no-lint`)
    pub lint_disabled: bool,
}

impl RunPlan {
    /// Validate the mode token and derive the glob. Fails before any phase can run.
    pub fn from_args(mode: Option<&str>, glob: Option<&str>, config: &RunnerConfig) -> OrchestratorResult<Self> {
        let mode = RunMode::from_token(mode)?;
        let glob = TestGlob::derive(glob, config);
        Ok(Self {
            mode,
            glob,
            lint_disabled: false,
        })
    }

    pub fn without_lint(mut self) -> Self {
        self.lint_disabled = true;
        self
    }

    pub fn runs_lint(&self) -> bool {
        self.mode.may_lint() && self.glob.is_all_tests() && !self.lint_disabled
    }

    /// Human-readable list of the phases this plan would execute.
    pub fn describe(&self, config: &RunnerConfig) -> Vec<String> {
        let mut steps = Vec::new();
        if self.mode.runs_setup() {
            match &config.setup_command {
                Some(spec) => steps.push(format!("setup: {}", spec.display_with(&spec.args))),
                None => steps.push("setup: (no-op)".to_string()),
            }
        }
        if self.mode.runs_tests() {
            let spec = &config.test_command;
            steps.push(format!(
                "tests: {}",
                spec.display_with(&spec.args_with_glob(self.glob.as_str()))
            ));
        }
        if self.runs_lint() {
            let spec = &config.lint_command;
            steps.push(format!("lint: {}", spec.display_with(&spec.args)));
        }
        steps
    }
}

/// The final code of a full `TEST` run: the test result wins when it is a failure, otherwise lint decides.
pub fn combine_exit_codes(test_code: i32, lint_code: i32) -> i32 {
    if test_code != 0 { test_code } else { lint_code }
}

/// Sequences the phases of a [`RunPlan`] over a [`PhaseRunner`].
pub struct Orchestrator<R: PhaseRunner> {
    runner: R,
}

impl<R: PhaseRunner> Orchestrator<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Execute the plan and return the exit code for the host process.
    #[tracing::instrument(skip_all, fields(mode = %plan.mode, glob = %plan.glob))]
    pub fn run(&mut self, plan: &RunPlan) -> OrchestratorResult<i32> {
        match plan.mode {
            RunMode::Test => {
                self.setup()?;
                let test_code = self.runner.run_tests(&plan.glob)?;
                if !plan.runs_lint() {
                    tracing::debug!("lint skipped");
                    return Ok(test_code);
                }
                let lint_code = self.runner.run_lint(test_code);
                Ok(combine_exit_codes(test_code, lint_code))
            }
            RunMode::SetupOnly => {
                self.setup()?;
                Ok(0)
            }
            RunMode::TestOnly => self.runner.run_tests(&plan.glob),
        }
    }

    fn setup(&mut self) -> OrchestratorResult<()> {
        self.runner.setup().inspect_err(|e| {
            eprintln!("Pre-test failed.");
            tracing::error!(error = %e, "pre-test setup failed");
        })
    }
}
