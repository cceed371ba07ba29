//! Chunk splitting and minimization policy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::types::ChunkStrategy;

/// Stylesheet assets the CSS minimizer applies to.
pub const CSS_ASSET_PATTERN: &str = r"\.css$";

/// Validated minification level.
///
/// Controls how aggressively script output is minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyLevel {
    /// No minification - output readable code.
    #[default]
    None,
    /// Remove whitespace and comments only.
    Whitespace,
    /// Syntax-level optimizations (property names preserved).
    Syntax,
    /// Full minification including identifier mangling.
    Identifiers,
}

impl MinifyLevel {
    /// Parse a minification level from a string.
    ///
    /// Values are case-insensitive; `true`/`false` map to the strongest and
    /// weakest level.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln_config::MinifyLevel;
    ///
    /// assert_eq!(MinifyLevel::parse("none").unwrap(), MinifyLevel::None);
    /// assert_eq!(MinifyLevel::parse("IDENTIFIERS").unwrap(), MinifyLevel::Identifiers);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for unrecognized values.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "whitespace" => Ok(Self::Whitespace),
            "syntax" => Ok(Self::Syntax),
            "identifiers" | "true" => Ok(Self::Identifiers),
            _ => Err(ConfigError::InvalidValue {
                field: "minify".to_string(),
                hint: Some(format!(
                    "'{s}' is not a minify level. Expected: none, whitespace, syntax, identifiers"
                )),
            }),
        }
    }

    /// Returns true if any minification is enabled.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for MinifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Syntax => write!(f, "syntax"),
            Self::Identifiers => write!(f, "identifiers"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimizerTarget {
    Stylesheet,
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum Minimizer {
    /// CSS optimizer run over emitted stylesheets
    Stylesheet {
        asset_pattern: String,
        discard_comments: bool,
    },
    /// Script minifier run over emitted bundles
    Script { level: MinifyLevel },
}

impl Minimizer {
    pub fn target(&self) -> MinimizerTarget {
        match self {
            Self::Stylesheet { .. } => MinimizerTarget::Stylesheet,
            Self::Script { .. } => MinimizerTarget::Script,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSplitting {
    pub chunks: ChunkStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationPolicy {
    pub split_chunks: ChunkSplitting,
    #[serde(default)]
    pub minimizers: Vec<Minimizer>,
}

impl OptimizationPolicy {
    /// Chunk splitting always extracts every shared module. Minimizers are
    /// only populated when the environment minifies, with scripts minified at
    /// `script_level`.
    pub fn for_environment(env: Environment, script_level: MinifyLevel) -> Self {
        let minimizers = if env.minify() {
            vec![
                Minimizer::Stylesheet {
                    asset_pattern: CSS_ASSET_PATTERN.to_string(),
                    discard_comments: true,
                },
                Minimizer::Script {
                    level: script_level,
                },
            ]
        } else {
            Vec::new()
        };

        Self {
            split_chunks: ChunkSplitting {
                chunks: ChunkStrategy::All,
            },
            minimizers,
        }
    }

    pub fn minimizes(&self, target: MinimizerTarget) -> bool {
        self.minimizers.iter().any(|m| m.target() == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_levels() {
        assert_eq!(MinifyLevel::parse("none").unwrap(), MinifyLevel::None);
        assert_eq!(
            MinifyLevel::parse("whitespace").unwrap(),
            MinifyLevel::Whitespace
        );
        assert_eq!(MinifyLevel::parse("syntax").unwrap(), MinifyLevel::Syntax);
        assert_eq!(MinifyLevel::parse("true").unwrap(), MinifyLevel::Identifiers);
    }

    #[test]
    fn test_parse_invalid_level() {
        let err = MinifyLevel::parse("max").unwrap_err();
        assert!(err.to_string().contains("minify"));
    }

    #[test]
    fn test_display_matches_parse() {
        for level in [
            MinifyLevel::None,
            MinifyLevel::Whitespace,
            MinifyLevel::Syntax,
            MinifyLevel::Identifiers,
        ] {
            assert_eq!(MinifyLevel::parse(&level.to_string()).unwrap(), level);
        }
    }

    #[test]
    fn development_policy_has_no_minimizers() {
        let policy =
            OptimizationPolicy::for_environment(Environment::Development, MinifyLevel::Identifiers);
        assert!(policy.minimizers.is_empty());
        assert_eq!(policy.split_chunks.chunks, ChunkStrategy::All);
    }

    #[test]
    fn production_policy_minimizes_styles_and_scripts() {
        let policy =
            OptimizationPolicy::for_environment(Environment::Production, MinifyLevel::Identifiers);
        assert_eq!(policy.minimizers.len(), 2);
        assert!(policy.minimizes(MinimizerTarget::Stylesheet));
        assert!(policy.minimizes(MinimizerTarget::Script));
        assert!(matches!(
            policy.minimizers[0],
            Minimizer::Stylesheet {
                discard_comments: true,
                ..
            }
        ));
    }

    #[test]
    fn script_level_flows_into_minimizer() {
        let policy =
            OptimizationPolicy::for_environment(Environment::Production, MinifyLevel::Syntax);
        assert_eq!(
            policy.minimizers[1],
            Minimizer::Script {
                level: MinifyLevel::Syntax
            }
        );
    }
}
