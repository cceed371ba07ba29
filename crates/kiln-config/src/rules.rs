//! Declarative file-type rules.
//!
//! A [`RuleTable`] maps file extensions to the asset class that decides the
//! processing chain. Rules are static configuration: they are validated once
//! and never mutated while a build runs.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::{AssetClass, Preprocessor};

/// Extension-based file matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMatcher {
    /// Extensions without the leading dot (a leading dot is tolerated)
    pub extensions: Vec<String>,

    /// Compare extensions ignoring ASCII case
    #[serde(default)]
    pub case_insensitive: bool,

    /// Path segments that veto a match (e.g. `node_modules`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl ExtensionMatcher {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            case_insensitive: false,
            exclude: Vec::new(),
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn excluding(mut self, segment: impl Into<String>) -> Self {
        self.exclude.push(segment.into());
        self
    }

    /// Whether `path` has one of the extensions and no excluded segment.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = extension_of(path) else {
            return false;
        };

        let hit = self.extensions.iter().map(|e| normalize_extension(e)).any(|e| {
            if self.case_insensitive {
                e.eq_ignore_ascii_case(ext)
            } else {
                e == ext
            }
        });

        hit && !self.is_excluded(path)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(segment) => self
                .exclude
                .iter()
                .any(|excluded| segment.to_str() == Some(excluded.as_str())),
            _ => false,
        })
    }
}

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRule {
    /// Rule identifier used in diagnostics and the manifest
    pub name: String,

    #[serde(flatten)]
    pub matcher: ExtensionMatcher,

    /// Asset class, which selects the chain shape
    pub class: AssetClass,

    /// Preprocessor compiled before extraction (stylesheets only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<Preprocessor>,

    /// Subdirectory of the output directory emitted files land in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Keep `[name].[ext]` regardless of the build's naming template
    #[serde(default)]
    pub fixed_name: bool,
}

impl ProcessingRule {
    pub fn new(name: impl Into<String>, class: AssetClass, matcher: ExtensionMatcher) -> Self {
        Self {
            name: name.into(),
            matcher,
            class,
            preprocessor: None,
            output_dir: None,
            fixed_name: false,
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_fixed_name(mut self) -> Self {
        self.fixed_name = true;
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.matches(path)
    }

    fn validate(&self) -> Result<()> {
        let malformed = |message: &str| ConfigError::MalformedRule {
            rule: self.name.clone(),
            message: message.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(ConfigError::MalformedRule {
                rule: "<unnamed>".to_string(),
                message: "rule name cannot be empty".to_string(),
            });
        }

        if self.matcher.extensions.is_empty() {
            return Err(malformed("at least one extension is required"));
        }

        for ext in &self.matcher.extensions {
            let ext = normalize_extension(ext);
            if ext.is_empty() {
                return Err(malformed("extensions cannot be empty"));
            }
            if ext.contains(['.', '/', '\\']) || ext.chars().any(char::is_whitespace) {
                return Err(malformed(&format!("'{ext}' is not a valid extension")));
            }
        }

        if self.preprocessor.is_some() && self.class != AssetClass::Stylesheet {
            return Err(malformed("only stylesheet rules can declare a preprocessor"));
        }

        Ok(())
    }
}

/// Ordered rule table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<ProcessingRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<ProcessingRule>) -> Self {
        Self { rules }
    }

    /// A table with no rules. Valid, but every asset is a configuration gap.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stylesheets, images, fonts and scripts for a typical browser project.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{AssetClass, RuleTable};
    /// use std::path::Path;
    ///
    /// let rules = RuleTable::standard();
    /// let rule = rules.find(Path::new("styles/app.scss")).unwrap();
    /// assert_eq!(rule.class, AssetClass::Stylesheet);
    /// assert!(rules.find(Path::new("data.xyz")).is_none());
    /// ```
    pub fn standard() -> Self {
        Self::new(vec![
            ProcessingRule::new(
                "css",
                AssetClass::Stylesheet,
                ExtensionMatcher::new(["css"]),
            ),
            ProcessingRule::new(
                "sass",
                AssetClass::Stylesheet,
                ExtensionMatcher::new(["scss", "sass"]),
            )
            .with_preprocessor(Preprocessor::Sass),
            ProcessingRule::new(
                "images",
                AssetClass::Image,
                ExtensionMatcher::new(["gif", "png", "jpg", "jpeg", "svg"]).case_insensitive(),
            )
            .with_output_dir("img"),
            ProcessingRule::new(
                "fonts",
                AssetClass::Font,
                ExtensionMatcher::new(["ttf", "eot", "otf", "woff", "woff2"]),
            )
            .with_output_dir("fonts")
            .with_fixed_name(),
            ProcessingRule::new(
                "scripts",
                AssetClass::Script,
                ExtensionMatcher::new(["js"]).excluding("node_modules"),
            ),
        ])
    }

    pub fn push(&mut self, rule: ProcessingRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching `path`.
    pub fn find(&self, path: &Path) -> Option<&ProcessingRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Reject malformed rules, duplicate rule names and extensions claimed by
    /// more than one rule.
    pub fn validate(&self) -> Result<()> {
        let mut names: HashSet<&str> = HashSet::new();
        let mut owners: HashMap<String, &str> = HashMap::new();

        for rule in &self.rules {
            rule.validate()?;

            if !names.insert(rule.name.as_str()) {
                return Err(ConfigError::MalformedRule {
                    rule: rule.name.clone(),
                    message: "rule names must be unique".to_string(),
                });
            }

            let claimed: IndexSet<String> = rule
                .matcher
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext).to_ascii_lowercase())
                .collect();

            for key in claimed {
                if let Some(first) = owners.get(&key) {
                    return Err(ConfigError::OverlappingRules {
                        extension: key,
                        first: first.to_string(),
                        second: rule.name.clone(),
                    });
                }
                owners.insert(key, &rule.name);
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a ProcessingRule;
    type IntoIter = std::slice::Iter<'a, ProcessingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<ProcessingRule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = ProcessingRule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Extension of `path` without the dot, if it has one.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn normalize_extension(ext: &str) -> &str {
    ext.trim().trim_start_matches('.')
}
