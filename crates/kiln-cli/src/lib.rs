//! Kiln CLI - resolve front-end build configuration for a target environment.
//!
//! This crate wraps `kiln-config` in a command-line interface. It loads a
//! project's configuration, picks the build environment, and hands the
//! resolved manifest to whatever bundling engine consumes it.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`config`] - Layered config loading: file, `KILN_*` variables, profiles
//! - [`commands`] - `resolve`, `check` and `rules`
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status messages and tables
//!
//! # Example
//!
//! ```rust
//! use kiln_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, true, true);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
