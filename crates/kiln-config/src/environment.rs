//! Build environment selection.
//!
//! Every environment-dependent decision the resolver makes is answered here,
//! so naming, source maps, hot reload, image compression and minification
//! can never disagree about which environment is active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::naming::NamingTemplate;
use crate::types::SourceMapOptions;

/// Process-wide variable the environment is read from.
pub const ENV_VAR: &str = "NODE_ENV";

/// Build environment. Fixed for the duration of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Iterative work: stable names, source maps, no minification
    Development,
    /// Release builds: content-hashed names, minification, compression
    Production,
}

impl Environment {
    /// Parse an environment name.
    ///
    /// Accepts `development`/`dev` and `production`/`prod`, ignoring case and
    /// surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::Environment;
    ///
    /// assert_eq!(Environment::parse("dev").unwrap(), Environment::Development);
    /// assert!(Environment::parse("staging").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: value.to_string(),
            }),
        }
    }

    /// Read the environment from `NODE_ENV`.
    ///
    /// An unset variable selects production. A set but unrecognized value is
    /// an error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_VAR) {
            Ok(value) => Self::parse(&value),
            Err(std::env::VarError::NotPresent) => {
                tracing::debug!("{ENV_VAR} not set, defaulting to production");
                Ok(Self::Production)
            }
            Err(std::env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidEnvironment {
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Output naming template applied to every emitted file of this build.
    pub fn naming(self) -> NamingTemplate {
        NamingTemplate::for_environment(self)
    }

    /// Source maps are emitted as external files in development only.
    pub fn source_maps(self) -> SourceMapOptions {
        match self {
            Self::Development => SourceMapOptions::External,
            Self::Production => SourceMapOptions::None,
        }
    }

    /// Hot module replacement for the dev server and extracted stylesheets.
    pub fn hot_reload(self) -> bool {
        self.is_development()
    }

    /// Image recompression is skipped during iterative work.
    pub fn compress_images(self) -> bool {
        self.is_production()
    }

    /// Whether generated HTML has its whitespace collapsed.
    pub fn collapse_whitespace(self) -> bool {
        self.is_production()
    }

    /// Whether stylesheet and script minimizers run.
    pub fn minify(self) -> bool {
        self.is_production()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_long_and_short_names() {
        assert_eq!(
            Environment::parse("development").unwrap(),
            Environment::Development
        );
        assert_eq!(Environment::parse("DEV").unwrap(), Environment::Development);
        assert_eq!(
            Environment::parse(" production ").unwrap(),
            Environment::Production
        );
        assert_eq!(Environment::parse("prod").unwrap(), Environment::Production);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = Environment::parse("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment { ref value } if value == "staging"));
        assert!(Environment::parse("").is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for env in [Environment::Development, Environment::Production] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn policy_switches_follow_environment() {
        let dev = Environment::Development;
        assert!(dev.hot_reload());
        assert!(!dev.compress_images());
        assert!(!dev.minify());
        assert_eq!(dev.source_maps(), SourceMapOptions::External);

        let prod = Environment::Production;
        assert!(!prod.hot_reload());
        assert!(prod.compress_images());
        assert!(prod.collapse_whitespace());
        assert_eq!(prod.source_maps(), SourceMapOptions::None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }
}
