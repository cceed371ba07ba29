//! Layered configuration loading.
//!
//! Priority: `KILN_*` environment variables > the profile for the active
//! environment > config file > built-in defaults. The environment itself
//! comes from `--env`, falling back to `NODE_ENV`.

use std::path::PathBuf;

use figment::{Figment, providers::Env};
use kiln_config::{
    ConfigDiscovery, ConfigResolver, Environment, KilnConfig, OutputManifest, load_value_from,
};
use serde_json::Value;

use crate::cli::ConfigArgs;
use crate::error::{ConfigError, Result};

/// Prefix of environment variables layered over the config file.
/// Nested keys are separated by `__`, e.g. `KILN_PROJECT__DEV_SERVER__PORT`.
pub const ENV_PREFIX: &str = "KILN_";

/// Configuration ready for resolution
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub env: Environment,
    /// Project root discovery and file checks run against
    pub root: PathBuf,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
    pub config: KilnConfig,
}

impl LoadedConfig {
    /// Load configuration for the given command-line options.
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        let root = match &args.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let env = match args.env {
            Some(arg) => arg.into(),
            None => Environment::from_env()?,
        };

        let source = match &args.config {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.clone()).into()),
            Some(path) => Some(path.clone()),
            None => ConfigDiscovery::new(&root).find(),
        };

        let config = match &source {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                load_value_from(path)
                    .and_then(KilnConfig::from_value)
                    .map_err(|e| invalid_configuration(e.to_string()))?
            }
            None => KilnConfig::default(),
        };

        let overrides: Value = Figment::from(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| invalid_configuration(e.to_string()))?;

        let config = config
            .materialize_profile(env)?
            .merge_overrides(&overrides)
            .map_err(|e| invalid_configuration(e.to_string()))?;

        tracing::debug!(
            environment = %env,
            rules = config.rules.len(),
            entries = config.project.entries.len(),
            "configuration loaded"
        );

        Ok(Self {
            env,
            root,
            source,
            config,
        })
    }

    /// Resolve the manifest for the loaded environment.
    pub fn resolve(&self) -> Result<OutputManifest> {
        let resolver = ConfigResolver::new(self.config.project.clone());
        Ok(resolver.resolve(self.env, &self.config.rules)?)
    }
}

fn invalid_configuration(value: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: "configuration".to_string(),
        value,
        hint: "Check kiln.toml syntax and KILN_* environment variables".to_string(),
    }
}
