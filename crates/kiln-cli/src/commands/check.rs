//! Check command implementation.
//!
//! Validates configuration, resolves the manifest, and verifies that every
//! listed asset is covered by a processing rule.

use kiln_config::{validate_fs, validate_schema};

use crate::cli::CheckArgs;
use crate::config::LoadedConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load configuration and select the environment
/// 2. Validate the schema (and project files with `--files`)
/// 3. Resolve the manifest, which also checks declared assets
/// 4. Look up a processing chain for each asset argument
///
/// Every uncovered asset is reported before the command fails.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let loaded = LoadedConfig::load(&args.config)?;
    match &loaded.source {
        Some(path) => ui::info(&format!("Using {}", path.display())),
        None => ui::warning("No kiln.toml found, using defaults"),
    }

    if args.files {
        validate_fs(&loaded.config, &loaded.root)?;
        ui::success("Project files are present");
    } else {
        validate_schema(&loaded.config)?;
    }

    let manifest = loaded.resolve()?;
    ui::success(&format!("Configuration is valid for {}", loaded.env));

    if args.assets.is_empty() {
        return Ok(());
    }

    ui::info("Checking assets...");
    let mut uncovered = 0;
    for asset in &args.assets {
        match manifest.chain_for(asset) {
            Ok(chain) => ui::success(&format!(
                "  {} → {} ({})",
                asset.display(),
                chain.rule,
                ui::format_chain(&chain.active_kinds())
            )),
            Err(err) => {
                uncovered += 1;
                ui::error(&format!("  {err}"));
            }
        }
    }

    if uncovered > 0 {
        return Err(CliError::UncoveredAssets { count: uncovered });
    }

    ui::success("All checks passed!");
    Ok(())
}
