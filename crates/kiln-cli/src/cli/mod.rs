//! Command-line interface definition for Kiln.
//!
//! # Command Structure
//!
//! - `kiln resolve` - Print or write the resolved output manifest
//! - `kiln check` - Validate configuration and report uncovered assets
//! - `kiln rules` - Show the processing chain each rule produces

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, ResolveArgs, RulesArgs};
pub use enums::*;

/// Kiln - environment-driven build configuration
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Resolve front-end build configuration for an environment",
    long_about = "Kiln turns a project's rule table and the build environment into an\n\
                  output manifest: file naming, per-asset processing chains, minimizers,\n\
                  static copies and plugin wiring for a bundling engine to execute."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_with_env_alias() {
        let cli = Cli::try_parse_from(["kiln", "resolve", "--env", "prod", "-o", "out.json"]).unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.config.env, Some(EnvArg::Production));
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert!(!args.compact);
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }

    #[test]
    fn parses_check_assets() {
        let cli = Cli::try_parse_from(["kiln", "check", "a.css", "b.png", "--files"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.assets.len(), 2);
                assert!(args.files);
                assert_eq!(args.config.env, None);
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kiln", "-v", "-q", "rules"]).is_err());
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!(Cli::try_parse_from(["kiln", "rules", "--env", "staging"]).is_err());
    }
}
