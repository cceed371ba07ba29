use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::EnvArg;

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the output manifest for an environment
    ///
    /// Prints the manifest as JSON on stdout, or writes it to --output.
    Resolve(ResolveArgs),

    /// Validate configuration and check assets against the rule table
    ///
    /// Fails when the configuration is invalid or when any listed asset has
    /// no processing rule.
    Check(CheckArgs),

    /// Show the processing chain each rule produces
    Rules(RulesArgs),
}

/// Options shared by every command that loads configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a config file (kiln.toml or package.json)
    ///
    /// If not provided, kiln.toml and then the `kiln` field of package.json
    /// are looked up in the project root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build environment (overrides NODE_ENV)
    #[arg(short, long, value_enum)]
    pub env: Option<EnvArg>,

    /// Project root used for discovery and file checks
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Asset files that must be covered by a processing rule
    #[arg(value_name = "ASSET")]
    pub assets: Vec<PathBuf>,

    /// Also check that the context, HTML template, favicon and copy sources exist
    #[arg(long)]
    pub files: bool,
}

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}
