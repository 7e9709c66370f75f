//! Runner configuration
//!
//! Defaults reproduce the project conventions: `ava` as the test runner, `npm run lint` as the linter, and test
//! files named `*.test.js` under `test/`. A JSON file can override any subset of the fields.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{OrchestratorError, OrchestratorResult};

/// Placeholder in [`CommandSpec::args`] replaced by the derived test glob.
pub const GLOB_PLACEHOLDER: &str = "{glob}";

/// An external program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables for the child process
    #[serde(default)]
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Arguments with every [`GLOB_PLACEHOLDER`] replaced by `glob`.
    pub fn args_with_glob(&self, glob: &str) -> Vec<String> {
        self.args.iter().map(|a| a.replace(GLOB_PLACEHOLDER, glob)).collect()
    }

    /// Shell-like rendering for log lines and dry runs.
    pub fn display_with(&self, args: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(args.iter().cloned());
        parts.join(" ")
    }
}

/// Configuration for a run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Test runner; `{glob}` in its arguments is replaced by the derived pattern
    pub test_command: CommandSpec,
    /// Linter, run after the tests when every test file was selected
    pub lint_command: CommandSpec,
    /// Environment reset; `None` makes setup a no-op
    pub setup_command: Option<CommandSpec>,
    pub glob_prefix: String,
    pub glob_suffix: String,
    /// Pattern used when no glob token is given
    pub all_tests_pattern: String,
    /// Variable exported to the test runner so test code can detect the test context
    pub test_context_env: Option<(String, String)>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            test_command: CommandSpec::new("ava").args([GLOB_PLACEHOLDER, "--verbose", "--fail-fast"]),
            lint_command: CommandSpec::new("npm").args(["run", "lint"]),
            setup_command: None,
            glob_prefix: "test/".to_string(),
            glob_suffix: ".test.js".to_string(),
            all_tests_pattern: "test/{**/*,*}.test.js".to_string(),
            test_context_env: Some(("ALPHA_TEST".to_string(), "1".to_string())),
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file. Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> OrchestratorResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| OrchestratorError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|e| OrchestratorError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_test_command(mut self, command: CommandSpec) -> Self {
        self.test_command = command;
        self
    }

    pub fn with_lint_command(mut self, command: CommandSpec) -> Self {
        self.lint_command = command;
        self
    }

    pub fn with_setup_command(mut self, command: CommandSpec) -> Self {
        self.setup_command = Some(command);
        self
    }

    pub fn with_glob_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.glob_prefix = prefix.into();
        self
    }

    pub fn with_glob_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.glob_suffix = suffix.into();
        self
    }

    pub fn with_all_tests_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.all_tests_pattern = pattern.into();
        self
    }

    /// Set (or with `None`, stop exporting) the test-context variable.
    pub fn with_test_context_env(mut self, var: Option<(String, String)>) -> Self {
        self.test_context_env = var;
        self
    }
}
