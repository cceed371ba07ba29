//! File-level configuration and environment profiles.
//!
//! This module provides the `KilnConfig` struct and profile merging logic.
//! For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::environment::Environment;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::project::ProjectConfig;
use crate::rules::RuleTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KilnConfig {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default = "RuleTable::standard")]
    pub rules: RuleTable,

    /// Per-environment project overrides, keyed by environment name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub profiles: HashMap<String, ProfileConfig>,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            rules: RuleTable::standard(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub project: Value,
}

impl KilnConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::KilnConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "project": {
    ///         "output_dir": "build"
    ///     }
    /// });
    ///
    /// let config = KilnConfig::from_value(value).unwrap();
    /// assert_eq!(config.project.output_dir, PathBuf::from("build"));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Fold the profile named after `env` into the project section.
    ///
    /// Profiles only override static project inputs. Naming, minimizers and
    /// source maps stay derived from the environment itself.
    pub fn materialize_profile(mut self, env: Environment) -> ConfigResult<Self> {
        let Some(profile_cfg) = self.profiles.get(env.as_str()) else {
            return Ok(self);
        };

        if !profile_cfg.project.is_null() {
            tracing::debug!(profile = env.as_str(), "applying profile overrides");
            let mut base = serde_json::to_value(&self.project).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: err.to_string(),
                }
            })?;
            merge_values(&mut base, &profile_cfg.project);
            self.project = serde_json::from_value(base).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: err.to_string(),
                }
            })?;
        }

        Ok(self)
    }

    /// Deep-merge `overrides` (shaped like a config file) over this config.
    ///
    /// Keys already present keep their position, so entry order survives.
    pub fn merge_overrides(self, overrides: &Value) -> ConfigResult<Self> {
        if overrides.as_object().is_none_or(|map| map.is_empty()) {
            return Ok(self);
        }

        let mut base = self.to_value()?;
        merge_values(&mut base, overrides);
        Self::from_value(base)
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn from_value_creates_config() {
        let value = json!({
            "project": {
                "entries": { "app": ["./app.js"] }
            }
        });

        let config = KilnConfig::from_value(value).unwrap();
        assert_eq!(config.project.entries["app"], vec!["./app.js".to_string()]);
        assert_eq!(config.rules, RuleTable::standard());
    }

    #[test]
    fn to_value_serializes_config() {
        let config = KilnConfig::default();
        let value = config.to_value().unwrap();
        assert_eq!(value["project"]["output_dir"], json!("dist"));
        assert!(value["rules"].is_array());
    }

    #[test]
    fn explicit_empty_rules_are_kept() {
        let config = KilnConfig::from_value(json!({ "rules": [] })).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn profile_merging_works() {
        let value = json!({
            "project": {
                "output_dir": "dist",
                "dev_server": { "port": 3000 }
            },
            "profiles": {
                "production": {
                    "project": { "output_dir": "release" }
                },
                "development": {
                    "project": { "dev_server": { "port": 8080 } }
                }
            }
        });

        let prod = KilnConfig::from_value(value.clone())
            .unwrap()
            .materialize_profile(Environment::Production)
            .unwrap();
        assert_eq!(prod.project.output_dir, PathBuf::from("release"));
        assert_eq!(prod.project.dev_server.port, 3000);

        let dev = KilnConfig::from_value(value)
            .unwrap()
            .materialize_profile(Environment::Development)
            .unwrap();
        assert_eq!(dev.project.output_dir, PathBuf::from("dist"));
        assert_eq!(dev.project.dev_server.port, 8080);
        assert_eq!(dev.project.dev_server.host, "127.0.0.1");
    }

    #[test]
    fn invalid_profile_override_is_reported() {
        let value = json!({
            "profiles": {
                "production": { "project": { "dev_server": { "port": "fast" } } }
            }
        });

        let err = KilnConfig::from_value(value)
            .unwrap()
            .materialize_profile(Environment::Production)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProfileOverride { .. }));
    }

    #[test]
    fn overrides_win_over_profile_and_keep_entry_order() {
        let value = json!({
            "project": {
                "entries": { "main": ["./index.js"], "admin": ["./admin.js"] }
            },
            "profiles": {
                "production": { "project": { "output_dir": "release" } }
            }
        });
        let overrides = json!({
            "project": {
                "output_dir": "from-env",
                "dev_server": { "port": 9000 }
            }
        });

        let config = KilnConfig::from_value(value)
            .unwrap()
            .materialize_profile(Environment::Production)
            .unwrap()
            .merge_overrides(&overrides)
            .unwrap();

        assert_eq!(config.project.output_dir, PathBuf::from("from-env"));
        assert_eq!(config.project.dev_server.port, 9000);
        let names: Vec<_> = config.project.entries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["main", "admin"]);
    }

    #[test]
    fn empty_overrides_leave_config_untouched() {
        let config = KilnConfig::default().merge_overrides(&json!({})).unwrap();
        assert_eq!(config, KilnConfig::default());
    }
}
