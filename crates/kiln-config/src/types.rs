use serde::{Deserialize, Serialize};

/// Kind of source asset a rule handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Plain and preprocessed stylesheets
    Stylesheet,
    /// Raster and vector images
    Image,
    /// Web fonts
    Font,
    /// Script sources
    Script,
}

impl AssetClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stylesheet => "stylesheet",
            Self::Image => "image",
            Self::Font => "font",
            Self::Script => "script",
        }
    }
}

/// Stylesheet preprocessor compiled ahead of extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocessor {
    /// Sass/SCSS (dart-sass implementation)
    Sass,
}

/// Source map generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapOptions {
    /// No source maps
    None,
    /// Inline source maps (base64)
    Inline,
    /// External .map files
    #[default]
    External,
    /// External with source content embedded
    ExternalWithContent,
}

impl SourceMapOptions {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Which chunks participate in shared-module extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Every shared module goes to a common chunk regardless of entry
    #[default]
    All,
    /// Only dynamically imported chunks
    Async,
    /// Only initial (entry) chunks
    Initial,
}
