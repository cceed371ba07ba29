use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Copy a static file into the output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyInstruction {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl CopyInstruction {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Plugin the engine runs around the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginInvocation {
    /// Render the HTML page from a template, injecting bundle tags
    Html {
        template: PathBuf,
        collapse_whitespace: bool,
    },
    /// Empty the output directory before emitting
    CleanOutput { dir: PathBuf },
    /// Copy static files
    Copy { patterns: Vec<CopyInstruction> },
    /// Write extracted stylesheets
    ExtractCss {
        filename: String,
        chunk_filename: String,
    },
}

impl PluginInvocation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Html { .. } => "html",
            Self::CleanOutput { .. } => "clean-output",
            Self::Copy { .. } => "copy",
            Self::ExtractCss { .. } => "extract-css",
        }
    }
}
