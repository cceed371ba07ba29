//! Command implementations for the Kiln CLI.
//!
//! - [`resolve`] - Emit the output manifest
//! - [`check`] - Validate configuration and asset coverage
//! - [`rules`] - Show processing chains per rule
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod resolve;
pub mod rules;

pub use check::execute as check_execute;
pub use resolve::execute as resolve_execute;
pub use rules::execute as rules_execute;
