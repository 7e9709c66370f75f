//! Run modes
//!
//! A run mode selects which phases execute. It is read once from the first positional argument.

use std::fmt;
use std::str::FromStr;

use crate::error::OrchestratorError;

/// Which life-cycle phases a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Setup, then tests, then lint when every test file is selected.
    #[default]
    Test,
    /// Setup only (reset the environment).
    SetupOnly,
    /// Tests only, without setup.
    TestOnly,
}

impl RunMode {
    /// All modes, in the order they are listed in help output.
    pub const ALL: [RunMode; 3] = [RunMode::Test, RunMode::SetupOnly, RunMode::TestOnly];

    /// Canonical token for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Test => "TEST",
            RunMode::SetupOnly => "SETUP_ONLY",
            RunMode::TestOnly => "TEST_ONLY",
        }
    }

    pub fn runs_setup(self) -> bool {
        matches!(self, RunMode::Test | RunMode::SetupOnly)
    }

    pub fn runs_tests(self) -> bool {
        matches!(self, RunMode::Test | RunMode::TestOnly)
    }

    /// Lint is only ever considered in a full `TEST` run.
    pub fn may_lint(self) -> bool {
        matches!(self, RunMode::Test)
    }

    /// Parse an optional token; absent or empty means [`RunMode::Test`].
    pub fn from_token(token: Option<&str>) -> Result<Self, OrchestratorError> {
        match token {
            None | Some("") => Ok(RunMode::default()),
            Some(t) => t.parse(),
        }
    }
}

impl FromStr for RunMode {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEST" => Ok(RunMode::Test),
            "SETUP_ONLY" | "SETUP" => Ok(RunMode::SetupOnly),
            "TEST_ONLY" | "TEST-ONLY" => Ok(RunMode::TestOnly),
            other => Err(OrchestratorError::InvalidRunMode(other.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
