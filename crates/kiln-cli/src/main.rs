//! Kiln CLI - resolve front-end build configuration for a target environment.
//!
//! This is the main entry point for the Kiln CLI. It handles command-line
//! argument parsing, logging initialization, and command dispatch.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Rules(rules_args) => commands::rules_execute(rules_args),
    };

    result.map_err(error::cli_error_to_miette)
}
