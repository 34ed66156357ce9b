//! Glass Bot operator CLI
//!
//! Command parsing and the setup checks behind `glassbot-cli verify`.

pub mod cli;
pub mod verify;

pub use cli::{Cli, Commands, DEFAULT_BACKEND_URL, DEFAULT_SENDER, log_filter_from_verbosity};
pub use verify::{CheckOutcome, CheckResult, HELP_MARKER, run_checks};
