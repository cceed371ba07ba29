//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::config::LoadedConfig;
use crate::error::Result;
use crate::ui;

/// Execute the rules command: one line per rule with its active chain.
pub fn execute(args: RulesArgs) -> Result<()> {
    let loaded = LoadedConfig::load(&args.config)?;
    let manifest = loaded.resolve()?;
    ui::print_rules_table(&manifest);
    Ok(())
}
