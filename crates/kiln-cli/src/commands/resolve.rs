//! Resolve command implementation.

use std::fs;

use crate::cli::ResolveArgs;
use crate::config::LoadedConfig;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the resolve command.
///
/// Loads configuration, resolves the manifest for the selected environment
/// and writes it as JSON to `--output` or stdout. Nothing is written when
/// resolution fails.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let loaded = LoadedConfig::load(&args.config)?;
    let manifest = loaded.resolve()?;

    let json = if args.compact {
        manifest.to_json()
    } else {
        manifest.to_json_pretty()
    }
    .context("Failed to serialize manifest")?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n")).with_path(path)?;
            ui::success(&format!("Wrote {}", path.display()));
            ui::print_manifest_summary(&manifest);
        }
        None => println!("{json}"),
    }

    Ok(())
}
