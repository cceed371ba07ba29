//! Formatting for chains, rule tables and manifest summaries.

use console::Term;
use kiln_config::{OutputManifest, StepKind};
use owo_colors::Style;

use super::messages::success;

/// Render step kinds as `compile → extract → transform`.
///
/// # Examples
///
/// ```
/// use kiln_cli::ui::format_chain;
/// use kiln_config::StepKind;
///
/// assert_eq!(format_chain(&[StepKind::Emit, StepKind::Compress]), "emit → compress");
/// assert_eq!(format_chain(&[]), "(none)");
/// ```
pub fn format_chain(kinds: &[StepKind]) -> String {
    if kinds.is_empty() {
        return "(none)".to_string();
    }

    kinds
        .iter()
        .map(|kind| step_name(*kind))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Render extensions as `.png .jpg`.
pub fn format_extensions(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(" ")
}

fn step_name(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Compile => "compile",
        StepKind::Extract => "extract",
        StepKind::Transform => "transform",
        StepKind::Emit => "emit",
        StepKind::Compress => "compress",
        StepKind::Transpile => "transpile",
    }
}

/// Print one line per processing chain to stdout.
pub fn print_rules_table(manifest: &OutputManifest) {
    println!("Rules ({})", manifest.environment());

    if manifest.chains().is_empty() {
        println!("  (no rules: every asset is a configuration gap)");
        return;
    }

    let name_width = manifest
        .chains()
        .iter()
        .map(|chain| console::measure_text_width(&chain.rule))
        .max()
        .unwrap_or(0);

    for chain in manifest.chains() {
        println!(
            "  {:<width$}  {:<10}  {}  [{}]",
            chain.rule,
            chain.class.as_str(),
            format_chain(&chain.active_kinds()),
            format_extensions(&chain.matcher.extensions),
            width = name_width
        );
    }
}

/// Print a short description of a written manifest to stderr.
pub fn print_manifest_summary(manifest: &OutputManifest) {
    let width = Term::stderr().size().1 as usize;
    let rule = "─".repeat(width.clamp(20, 80));
    let heading = if super::colors_enabled() {
        use owo_colors::OwoColorize;
        "Manifest Summary"
            .style(Style::new().bold().underline())
            .to_string()
    } else {
        "Manifest Summary".to_string()
    };

    eprintln!("\n{heading}");
    eprintln!("{rule}");
    for bundle in manifest.bundles() {
        eprintln!("  ▸ {} ({} modules)", bundle.filename, bundle.modules.len());
    }
    eprintln!(
        "  ▸ {} chains, {} minimizers, source maps: {:?}",
        manifest.chains().len(),
        manifest.optimization().minimizers.len(),
        manifest.source_maps()
    );
    eprintln!("{rule}");
    success(&format!("Resolved for {}", manifest.environment()));
}
