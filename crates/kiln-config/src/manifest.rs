//! The resolved build description handed to the bundling engine.
//!
//! An [`OutputManifest`] is produced once per build and never mutated. Its
//! fields are only reachable through accessors, so a manifest can be shared
//! across engine worker threads without synchronization.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chain::ProcessingChain;
use crate::dev::DevServer;
use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::naming::{HASH_PLACEHOLDER, NAME_PLACEHOLDER, NamingTemplate};
use crate::optimization::OptimizationPolicy;
use crate::plugins::{CopyInstruction, PluginInvocation};
use crate::project::ResolveOptions;
use crate::rules::extension_of;
use crate::types::{AssetClass, SourceMapOptions};

/// Subdirectory extracted stylesheets are written to.
pub const CSS_DIR: &str = "css";

/// Output naming for scripts and extracted stylesheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub naming: NamingTemplate,
    /// Script filename pattern, e.g. `[name].[contenthash].js`
    pub filename: String,
    /// Stylesheet filename pattern, e.g. `css/[name].css`
    pub css_filename: String,
    pub css_chunk_filename: String,
}

/// One named entry bundle and the file it is emitted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOutput {
    pub name: String,
    pub modules: Vec<String>,
    /// Filename pattern with `[name]` already substituted
    pub filename: String,
}

/// A file no processing rule covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigGap {
    pub path: PathBuf,
    /// Empty when the file has no extension at all
    pub extension: String,
}

impl From<ConfigGap> for ConfigError {
    fn from(gap: ConfigGap) -> Self {
        ConfigError::UnmatchedExtension {
            path: gap.path,
            extension: gap.extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputManifest {
    pub(crate) environment: Environment,
    pub(crate) context: PathBuf,
    pub(crate) entries: IndexMap<String, Vec<String>>,
    pub(crate) output: OutputOptions,
    pub(crate) resolve: ResolveOptions,
    pub(crate) chains: Vec<ProcessingChain>,
    pub(crate) optimization: OptimizationPolicy,
    pub(crate) source_maps: SourceMapOptions,
    pub(crate) favicon: CopyInstruction,
    pub(crate) copies: Vec<CopyInstruction>,
    pub(crate) plugins: Vec<PluginInvocation>,
    pub(crate) dev_server: DevServer,
}

impl OutputManifest {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn entries(&self) -> &IndexMap<String, Vec<String>> {
        &self.entries
    }

    pub fn output(&self) -> &OutputOptions {
        &self.output
    }

    pub fn naming(&self) -> NamingTemplate {
        self.output.naming
    }

    pub fn resolve_options(&self) -> &ResolveOptions {
        &self.resolve
    }

    pub fn chains(&self) -> &[ProcessingChain] {
        &self.chains
    }

    pub fn optimization(&self) -> &OptimizationPolicy {
        &self.optimization
    }

    pub fn source_maps(&self) -> SourceMapOptions {
        self.source_maps
    }

    /// The favicon copy instruction, present in every manifest.
    pub fn favicon(&self) -> &CopyInstruction {
        &self.favicon
    }

    /// Every static copy, favicon first.
    pub fn copies(&self) -> impl Iterator<Item = &CopyInstruction> {
        std::iter::once(&self.favicon).chain(self.copies.iter())
    }

    pub fn plugins(&self) -> &[PluginInvocation] {
        &self.plugins
    }

    pub fn dev_server(&self) -> &DevServer {
        &self.dev_server
    }

    /// One output per named entry. Bundles are built and emitted separately.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{resolve, Environment, RuleTable};
    ///
    /// let manifest = resolve(Environment::Development, &RuleTable::standard()).unwrap();
    /// let files: Vec<_> = manifest.bundles().into_iter().map(|b| b.filename).collect();
    /// assert_eq!(files, vec!["main.js", "analytics.js"]);
    /// ```
    pub fn bundles(&self) -> Vec<BundleOutput> {
        self.entries
            .iter()
            .map(|(name, modules)| BundleOutput {
                name: name.clone(),
                modules: modules.clone(),
                filename: self.output.filename.replace(NAME_PLACEHOLDER, name),
            })
            .collect()
    }

    /// The chain that processes `path`.
    ///
    /// A path no rule covers is a configuration gap: it is logged and
    /// returned as [`ConfigError::UnmatchedExtension`], never given a default
    /// chain.
    pub fn chain_for(&self, path: &Path) -> Result<&ProcessingChain> {
        match self.chains.iter().find(|chain| chain.matches(path)) {
            Some(chain) => Ok(chain),
            None => {
                let gap = gap_for(path);
                tracing::warn!(
                    path = %gap.path.display(),
                    extension = %gap.extension,
                    "no processing rule covers asset"
                );
                Err(gap.into())
            }
        }
    }

    /// Whether some chain covers `path`.
    pub fn covers(&self, path: &Path) -> bool {
        self.chains.iter().any(|chain| chain.matches(path))
    }

    /// Every path in `paths` no chain covers.
    pub fn gaps<I>(&self, paths: I) -> Vec<ConfigGap>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        paths
            .into_iter()
            .filter(|path| !self.covers(path.as_ref()))
            .map(|path| gap_for(path.as_ref()))
            .collect()
    }

    /// Concrete output path (relative to the output directory) for the file
    /// emitted from `source`.
    ///
    /// The chain is chosen the way [`chain_for`](Self::chain_for) chooses it,
    /// so an uncovered source is a configuration gap. Scripts and stylesheets
    /// take the build's naming template; emitted assets follow their rule's
    /// emit step.
    pub fn output_path(&self, source: &Path, content: &[u8]) -> Result<PathBuf> {
        let chain = self.chain_for(source)?;
        let name = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        let path = match chain.class {
            AssetClass::Script => PathBuf::from(self.output.naming.render(name, "js", content)),
            AssetClass::Stylesheet => {
                Path::new(CSS_DIR).join(self.output.naming.render(name, "css", content))
            }
            AssetClass::Image | AssetClass::Font => {
                let ext = extension_of(source).unwrap_or_default();
                let Some((pattern, dir)) = chain.emit() else {
                    return Ok(PathBuf::from(self.output.naming.render(name, ext, content)));
                };

                // Rules with a fixed name emit without a hash even in production.
                let naming = if pattern.contains(HASH_PLACEHOLDER) {
                    NamingTemplate::ContentHash
                } else {
                    NamingTemplate::Stable
                };
                let file = naming.render(name, ext, content);
                match dir {
                    Some(dir) => Path::new(dir).join(file),
                    None => PathBuf::from(file),
                }
            }
        };

        Ok(path)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ConfigError::InvalidValue {
            field: "manifest".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "manifest".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

fn gap_for(path: &Path) -> ConfigGap {
    ConfigGap {
        path: path.to_path_buf(),
        extension: extension_of(path).unwrap_or_default().to_string(),
    }
}
