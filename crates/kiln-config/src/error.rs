//! Error types for configuration loading, validation and resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Environment selection
    #[error("invalid environment '{value}': expected 'development' or 'production'")]
    InvalidEnvironment { value: String },

    // Rule table errors
    #[error("malformed rule '{rule}': {message}")]
    MalformedRule { rule: String, message: String },

    #[error("extension '.{extension}' is claimed by both '{first}' and '{second}'")]
    OverlappingRules {
        extension: String,
        first: String,
        second: String,
    },

    #[error("no processing rule matches {} (extension: {extension})", path.display())]
    UnmatchedExtension { path: PathBuf, extension: String },

    // Project errors
    #[error("no entries specified")]
    NoEntries,

    #[error("entry bundle '{name}' is invalid: {message}")]
    InvalidEntry { name: String, message: String },

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Filesystem validation errors (for CLI use)
    #[error("context directory not found: {}", path.display())]
    ContextNotFound { path: PathBuf },

    #[error("static asset not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    #[error("config not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
