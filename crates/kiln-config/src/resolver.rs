//! Turns an environment and a rule table into an [`OutputManifest`].
//!
//! Resolution is one deterministic pass with no side effects beyond log
//! events: the same inputs always produce a structurally identical manifest,
//! and any configuration error aborts before a manifest exists.

use std::path::PathBuf;

use crate::chain::{ChainContext, build_chain};
use crate::dev::DevServer;
use crate::environment::Environment;
use crate::error::Result;
use crate::manifest::{CSS_DIR, OutputManifest, OutputOptions};
use crate::optimization::OptimizationPolicy;
use crate::plugins::{CopyInstruction, PluginInvocation};
use crate::project::ProjectConfig;
use crate::rules::RuleTable;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Stylesheet chunks are named by id and never hashed.
pub const CSS_CHUNK_FILENAME: &str = "css/[id].css";

/// Resolve the default project.
///
/// # Example
///
/// ```
/// use kiln_config::{resolve, Environment, RuleTable};
///
/// let manifest = resolve(Environment::Production, &RuleTable::standard()).unwrap();
/// assert_eq!(manifest.output().filename, "[name].[contenthash].js");
/// assert_eq!(manifest.optimization().minimizers.len(), 2);
/// ```
pub fn resolve(env: Environment, rules: &RuleTable) -> Result<OutputManifest> {
    ConfigResolver::default().resolve(env, rules)
}

/// Resolver bound to one project's static inputs
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    project: ProjectConfig,
}

impl ConfigResolver {
    pub fn new(project: ProjectConfig) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Resolve the manifest for `env`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid project, a malformed or overlapping rule table, or
    /// a declared asset no rule covers.
    pub fn resolve(&self, env: Environment, rules: &RuleTable) -> Result<OutputManifest> {
        let project = &self.project;
        SchemaValidator.validate_project(project)?;
        rules.validate()?;

        let naming = env.naming();
        tracing::debug!(
            environment = %env,
            rules = rules.len(),
            hashed = naming.includes_hash(),
            "resolving build configuration"
        );

        let ctx = ChainContext {
            env,
            naming,
            css_public_path: &project.css_public_path,
        };
        let chains = rules.iter().map(|rule| build_chain(rule, ctx)).collect();

        let output = OutputOptions {
            dir: project.output_dir.clone(),
            naming,
            filename: naming.pattern("js"),
            css_filename: format!("{CSS_DIR}/{}", naming.pattern("css")),
            css_chunk_filename: CSS_CHUNK_FILENAME.to_string(),
        };

        let favicon = CopyInstruction::new(project.favicon.clone(), project.output_dir.clone());
        let copies = project.copy.clone();

        let plugins = build_plugins(env, project, &output, &favicon, &copies);

        let manifest = OutputManifest {
            environment: env,
            context: project.context.clone(),
            entries: project.entries.clone(),
            output,
            resolve: project.resolve.clone(),
            chains,
            optimization: OptimizationPolicy::for_environment(env, project.script_minify),
            source_maps: env.source_maps(),
            favicon,
            copies,
            plugins,
            dev_server: DevServer {
                host: project.dev_server.host.clone(),
                port: project.dev_server.port,
                hot: env.hot_reload(),
            },
        };

        check_declared_assets(&manifest, &project.assets)?;

        tracing::debug!(
            bundles = manifest.entries().len(),
            chains = manifest.chains().len(),
            "resolved build configuration"
        );
        Ok(manifest)
    }
}

fn build_plugins(
    env: Environment,
    project: &ProjectConfig,
    output: &OutputOptions,
    favicon: &CopyInstruction,
    copies: &[CopyInstruction],
) -> Vec<PluginInvocation> {
    let mut patterns = Vec::with_capacity(copies.len() + 1);
    patterns.push(favicon.clone());
    patterns.extend(copies.iter().cloned());

    vec![
        PluginInvocation::Html {
            template: project.html_template.clone(),
            collapse_whitespace: env.collapse_whitespace(),
        },
        PluginInvocation::CleanOutput {
            dir: project.output_dir.clone(),
        },
        PluginInvocation::Copy { patterns },
        PluginInvocation::ExtractCss {
            filename: output.css_filename.clone(),
            chunk_filename: output.css_chunk_filename.clone(),
        },
    ]
}

fn check_declared_assets(manifest: &OutputManifest, assets: &[PathBuf]) -> Result<()> {
    let gaps = manifest.gaps(assets);
    for gap in &gaps {
        tracing::warn!(
            path = %gap.path.display(),
            extension = %gap.extension,
            "declared asset has no processing rule"
        );
    }

    match gaps.into_iter().next() {
        Some(gap) => Err(gap.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn default_resolver_uses_default_project() {
        let resolver = ConfigResolver::default();
        assert_eq!(resolver.project(), &ProjectConfig::default());
    }

    #[test]
    fn css_filename_lives_under_css_dir() {
        let dev = resolve(Environment::Development, &RuleTable::standard()).unwrap();
        assert_eq!(dev.output().css_filename, "css/[name].css");
        assert_eq!(dev.output().css_chunk_filename, "css/[id].css");

        let prod = resolve(Environment::Production, &RuleTable::standard()).unwrap();
        assert_eq!(prod.output().css_filename, "css/[name].[contenthash].css");
    }

    #[test]
    fn plugins_are_wired_in_order() {
        let manifest = resolve(Environment::Production, &RuleTable::standard()).unwrap();
        let names: Vec<_> = manifest.plugins().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["html", "clean-output", "copy", "extract-css"]);
        assert!(matches!(
            manifest.plugins()[0],
            PluginInvocation::Html {
                collapse_whitespace: true,
                ..
            }
        ));
    }

    #[test]
    fn declared_asset_without_rule_fails_resolution() {
        let project = ProjectConfig::default()
            .with_asset("src/styles/app.css")
            .with_asset("src/data/table.xyz");

        let err = ConfigResolver::new(project)
            .resolve(Environment::Development, &RuleTable::standard())
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::UnmatchedExtension { ref extension, .. } if extension == "xyz"
        ));
    }

    #[test]
    fn invalid_rules_fail_before_resolution() {
        let mut rules = RuleTable::standard();
        rules.push(crate::rules::ProcessingRule::new(
            "dup",
            crate::types::AssetClass::Script,
            crate::rules::ExtensionMatcher::new(["js"]),
        ));

        let err = resolve(Environment::Production, &rules).unwrap_err();
        assert!(matches!(err, ConfigError::OverlappingRules { .. }));
    }
}
