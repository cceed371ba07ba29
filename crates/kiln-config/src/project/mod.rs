//! Static project inputs: entries, output location, resolve options and the
//! files copied or templated around the build.

mod helpers;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dev::DevServerConfig;
use crate::error::ConfigError;
use crate::optimization::MinifyLevel;
use crate::plugins::CopyInstruction;

use helpers::{
    default_aliases, default_context, default_css_public_path, default_entries,
    default_extensions, default_favicon, default_html_template, default_output_dir,
    default_script_minify, deserialize_minify_level,
};

/// Project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory entry modules are resolved from
    #[serde(default = "default_context")]
    pub context: PathBuf,

    /// Named entry bundles, each an ordered list of module specifiers
    #[serde(default = "default_entries")]
    pub entries: IndexMap<String, Vec<String>>,

    /// Output directory for emitted files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Module resolution options
    #[serde(default)]
    pub resolve: ResolveOptions,

    /// HTML template rendered into the output directory
    #[serde(default = "default_html_template")]
    pub html_template: PathBuf,

    /// Favicon copied to the output root on every build
    #[serde(default = "default_favicon")]
    pub favicon: PathBuf,

    /// Additional static files to copy
    #[serde(default)]
    pub copy: Vec<CopyInstruction>,

    /// Public path extracted stylesheets use to reference assets
    #[serde(default = "default_css_public_path")]
    pub css_public_path: String,

    /// Development server settings
    #[serde(default)]
    pub dev_server: DevServerConfig,

    /// Asset sources that must be covered by a processing rule
    #[serde(default)]
    pub assets: Vec<PathBuf>,

    /// Script minifier level used when the environment minifies
    #[serde(
        default = "default_script_minify",
        deserialize_with = "deserialize_minify_level"
    )]
    pub script_minify: MinifyLevel,
}

impl ProjectConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::ProjectConfig;
    /// use serde_json::json;
    ///
    /// let project = ProjectConfig::from_value(json!({
    ///     "entries": { "app": ["./app.js"] },
    ///     "output_dir": "build"
    /// }))
    /// .unwrap();
    /// assert_eq!(project.entries["app"], vec!["./app.js".to_string()]);
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "project".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "project".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Add or replace an entry bundle
    pub fn with_entry<I, S>(mut self, name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(name.into(), modules.into_iter().map(Into::into).collect());
        self
    }

    /// Add a path alias for import resolution
    ///
    /// # Example
    /// ```
    /// use kiln_config::ProjectConfig;
    ///
    /// let project = ProjectConfig::default().with_alias("@styles", "src/styles");
    /// assert!(project.resolve.aliases.contains_key("@styles"));
    /// ```
    pub fn with_alias(mut self, alias: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resolve.aliases.insert(alias.into(), path.into());
        self
    }

    /// Declare an asset source that must match a processing rule
    pub fn with_asset(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets.push(path.into());
        self
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
            entries: default_entries(),
            output_dir: default_output_dir(),
            resolve: ResolveOptions::default(),
            html_template: default_html_template(),
            favicon: default_favicon(),
            copy: Vec::new(),
            css_public_path: default_css_public_path(),
            dev_server: DevServerConfig::default(),
            assets: Vec::new(),
            script_minify: default_script_minify(),
        }
    }
}

/// Module resolution options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Extensions tried, in order, for extensionless imports
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Import prefix → directory (e.g. "@models" → "src/models")
    #[serde(default = "default_aliases")]
    pub aliases: IndexMap<String, PathBuf>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            aliases: default_aliases(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_declare_main_and_analytics_bundles() {
        let project = ProjectConfig::default();
        let names: Vec<_> = project.entries.keys().cloned().collect();
        assert_eq!(names, vec!["main", "analytics"]);
        assert_eq!(
            project.entries["main"],
            vec!["@babel/polyfill".to_string(), "./index.js".to_string()]
        );
        assert_eq!(project.dev_server.port, 4200);
        assert_eq!(project.favicon, PathBuf::from("src/assets/favicon.ico"));
    }

    #[test]
    fn partial_value_keeps_defaults() {
        let project = ProjectConfig::from_value(json!({ "output_dir": "public" })).unwrap();
        assert_eq!(project.output_dir, PathBuf::from("public"));
        assert_eq!(project.context, PathBuf::from("src"));
        assert_eq!(project.resolve.extensions, vec![".js", ".json"]);
    }

    #[test]
    fn entry_order_is_preserved() {
        let project = ProjectConfig::from_value(json!({
            "entries": { "zeta": ["./z.js"], "alpha": ["./a.js"] }
        }))
        .unwrap();
        let names: Vec<_> = project.entries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn invalid_value_reports_field() {
        let err = ProjectConfig::from_value(json!({ "entries": 3 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "project"));
    }

    #[test]
    fn script_minify_accepts_enabled_levels_only() {
        assert_eq!(
            ProjectConfig::default().script_minify,
            MinifyLevel::Identifiers
        );

        let project = ProjectConfig::from_value(json!({ "script_minify": "Syntax" })).unwrap();
        assert_eq!(project.script_minify, MinifyLevel::Syntax);

        let project = ProjectConfig::from_value(json!({ "script_minify": true })).unwrap();
        assert_eq!(project.script_minify, MinifyLevel::Identifiers);

        for rejected in [json!("max"), json!("none"), json!(false)] {
            let err = ProjectConfig::from_value(json!({ "script_minify": rejected })).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }));
        }
    }
}
