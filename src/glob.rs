//! Test-file glob derivation
//!
//! A user-supplied token is normalized so that it starts with the test directory prefix and ends with the
//! test-file suffix, each exactly once. Without a token the catch-all pattern selects every test file in the
//! tree. Derivation is idempotent: deriving from an already-derived pattern returns it unchanged.

use std::fmt;

use crate::config::RunnerConfig;

/// The file pattern handed to the test runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGlob {
    pattern: String,
    all_tests: bool,
}

impl TestGlob {
    /// Derive the glob from an optional token using the configured prefix, suffix and catch-all pattern.
    pub fn derive(token: Option<&str>, config: &RunnerConfig) -> Self {
        let pattern = match token {
            Some(token) => normalize(token, &config.glob_prefix, &config.glob_suffix),
            None => config.all_tests_pattern.clone(),
        };
        // Textual comparison: a token that normalizes to the catch-all also counts as "all tests".
        let all_tests = pattern == config.all_tests_pattern;
        Self { pattern, all_tests }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether this glob selects every test file (and therefore enables the lint phase).
    pub fn is_all_tests(&self) -> bool {
        self.all_tests
    }
}

impl fmt::Display for TestGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Ensure `prefix` leads and `suffix` trails `token`, adding each only when missing.
pub fn normalize(token: &str, prefix: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + token.len() + suffix.len());
    if !token.starts_with(prefix) {
        out.push_str(prefix);
    }
    out.push_str(token);
    if !out.ends_with(suffix) {
        out.push_str(suffix);
    }
    out
}
