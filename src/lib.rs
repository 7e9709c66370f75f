#![forbid(unsafe_code)]
//! testrun: a test run orchestrator
//!
//! A single invocation validates a run mode, derives a test-file glob, and runs
//! up to three strictly sequential phases against external tools:
//!
//! 1. **setup** - resets the test environment (no-op unless a reset command is configured)
//! 2. **test** - spawns the test runner against the glob (`ava <glob> --verbose --fail-fast`)
//! 3. **lint** - spawns the linter (`npm run lint`) when every test file was selected
//!
//! The process then exits with the worst code among the phases that ran.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod glob;
pub mod mode;
pub mod orchestrator;
pub mod phases;
pub mod version;

pub use config::{CommandSpec, RunnerConfig};
pub use error::{OrchestratorError, OrchestratorResult};
pub use glob::TestGlob;
pub use mode::RunMode;
pub use orchestrator::{Orchestrator, RunPlan};
pub use phases::{PhaseRunner, ProcessPhaseRunner};
