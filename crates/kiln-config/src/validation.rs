//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for
//! library use, where sources may be virtual).

use std::path::{Path, PathBuf};

use crate::config::KilnConfig;
use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate the project section
    fn validate_project(&self, project: &ProjectConfig) -> Result<()>;

    /// Validate a whole config: project plus rule table
    fn validate(&self, config: &KilnConfig) -> Result<()> {
        self.validate_project(&config.project)?;
        config.rules.validate()
    }
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kiln_config::{ConfigValidator, ProjectConfig, SchemaValidator};
///
/// SchemaValidator.validate_project(&ProjectConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate_project(&self, project: &ProjectConfig) -> Result<()> {
        if project.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for (name, modules) in &project.entries {
            let invalid = |message: &str| ConfigError::InvalidEntry {
                name: name.clone(),
                message: message.to_string(),
            };

            if name.trim().is_empty() {
                return Err(invalid("bundle names cannot be empty"));
            }
            if name.contains(['/', '\\']) {
                return Err(invalid("bundle names cannot contain path separators"));
            }
            if modules.is_empty() {
                return Err(invalid("a bundle needs at least one module"));
            }
            if modules.iter().any(|m| m.trim().is_empty()) {
                return Err(invalid("module specifiers cannot be empty"));
            }
        }

        if project.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output_dir".to_string(),
                hint: Some("Set output_dir to a directory such as \"dist\"".to_string()),
            });
        }

        if project.favicon.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "favicon".to_string(),
                hint: Some("Every build copies a favicon; point favicon at it".to_string()),
            });
        }

        if project.dev_server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dev_server.port".to_string(),
                hint: Some("Use a port between 1 and 65535".to_string()),
            });
        }

        if !project.script_minify.is_enabled() {
            return Err(ConfigError::InvalidValue {
                field: "script_minify".to_string(),
                hint: Some("Use whitespace, syntax or identifiers".to_string()),
            });
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Validates that the context directory, favicon, HTML template and copy
/// sources exist on disk.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate_project(&self, project: &ProjectConfig) -> Result<()> {
        // First run schema validation
        SchemaValidator.validate_project(project)?;

        let context = self.root.join(&project.context);
        if !context.is_dir() {
            return Err(ConfigError::ContextNotFound { path: context });
        }

        // The HTML template is resolved from the context directory.
        let template = context.join(&project.html_template);
        if !template.exists() {
            return Err(ConfigError::AssetNotFound { path: template });
        }

        let sources = std::iter::once(&project.favicon).chain(project.copy.iter().map(|c| &c.from));
        for source in sources {
            let path = self.root.join(source);
            if !path.exists() {
                return Err(ConfigError::AssetNotFound { path });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &KilnConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &KilnConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn schema_validator_rejects_empty_entries() {
        let mut project = ProjectConfig::default();
        project.entries = IndexMap::new();
        let result = SchemaValidator.validate_project(&project);
        assert!(matches!(result.unwrap_err(), ConfigError::NoEntries));
    }

    #[test]
    fn schema_validator_accepts_defaults() {
        assert!(SchemaValidator.validate(&KilnConfig::default()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_empty_bundle() {
        let project = ProjectConfig::default().with_entry("worker", Vec::<String>::new());
        let err = SchemaValidator.validate_project(&project).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { ref name, .. } if name == "worker"));
    }

    #[test]
    fn schema_validator_rejects_nested_bundle_name() {
        let project = ProjectConfig::default().with_entry("js/app", ["./app.js"]);
        assert!(matches!(
            SchemaValidator.validate_project(&project).unwrap_err(),
            ConfigError::InvalidEntry { .. }
        ));
    }

    #[test]
    fn schema_validator_rejects_port_zero() {
        let mut project = ProjectConfig::default();
        project.dev_server.port = 0;
        assert!(matches!(
            SchemaValidator.validate_project(&project).unwrap_err(),
            ConfigError::InvalidValue { ref field, .. } if field == "dev_server.port"
        ));
    }

    #[test]
    fn schema_validator_rejects_disabled_script_minify() {
        let mut project = ProjectConfig::default();
        project.script_minify = crate::optimization::MinifyLevel::None;
        assert!(matches!(
            SchemaValidator.validate_project(&project).unwrap_err(),
            ConfigError::InvalidValue { ref field, .. } if field == "script_minify"
        ));
    }

    #[test]
    fn validate_schema_checks_rules() {
        let mut config = KilnConfig::default();
        config.rules.push(crate::rules::ProcessingRule::new(
            "",
            crate::types::AssetClass::Font,
            crate::rules::ExtensionMatcher::new(["otf2"]),
        ));
        assert!(matches!(
            validate_schema(&config).unwrap_err(),
            ConfigError::MalformedRule { .. }
        ));
    }
}
