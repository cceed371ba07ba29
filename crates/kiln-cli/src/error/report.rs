//! Miette diagnostic conversion for CLI errors.

use kiln_config::ConfigError as ResolveError;
use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Resolve(e) => resolve_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a resolution error to a report with a targeted hint
pub fn resolve_error_to_miette(err: ResolveError) -> Report {
    match &err {
        ResolveError::InvalidEnvironment { .. } => miette::miette!(
            help = "Set NODE_ENV or pass --env with 'development' or 'production'",
            "{}",
            err
        ),
        ResolveError::UnmatchedExtension { extension, .. } => miette::miette!(
            help = format!("Add a rule listing '{extension}' to the [[rules]] table"),
            "{}",
            err
        ),
        ResolveError::OverlappingRules { .. } => miette::miette!(
            help = "Each extension may appear in only one rule",
            "{}",
            err
        ),
        ResolveError::ContextNotFound { .. } | ResolveError::AssetNotFound { .. } => {
            miette::miette!(
                help = "Paths are resolved from the project root (see --cwd)",
                "{}",
                err
            )
        }
        _ => miette::miette!("{}", err),
    }
}
