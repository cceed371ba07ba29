//! Output file naming.
//!
//! A build uses exactly one [`NamingTemplate`]: stable names while iterating,
//! content-hashed names for releases so that only changed files get new URLs.

use serde::{Deserialize, Serialize};

use crate::environment::Environment;

/// Number of hex characters of the content digest kept in file names.
pub const HASH_LEN: usize = 8;

/// Placeholder for the logical asset name.
pub const NAME_PLACEHOLDER: &str = "[name]";

/// Placeholder for the content digest.
pub const HASH_PLACEHOLDER: &str = "[contenthash]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingTemplate {
    /// `<name>.<ext>`
    Stable,
    /// `<name>.<hash>.<ext>`
    ContentHash,
}

impl NamingTemplate {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::Stable,
            Environment::Production => Self::ContentHash,
        }
    }

    pub fn includes_hash(self) -> bool {
        matches!(self, Self::ContentHash)
    }

    /// Engine-facing filename pattern for an extension.
    ///
    /// `ext` may itself be a placeholder such as `[ext]`.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::NamingTemplate;
    ///
    /// assert_eq!(NamingTemplate::Stable.pattern("js"), "[name].js");
    /// assert_eq!(
    ///     NamingTemplate::ContentHash.pattern("css"),
    ///     "[name].[contenthash].css"
    /// );
    /// ```
    pub fn pattern(self, ext: &str) -> String {
        let ext = trim_dot(ext);
        match self {
            Self::Stable => format!("{NAME_PLACEHOLDER}.{ext}"),
            Self::ContentHash => format!("{NAME_PLACEHOLDER}.{HASH_PLACEHOLDER}.{ext}"),
        }
    }

    /// Concrete file name for an asset with the given contents.
    pub fn render(self, name: &str, ext: &str, content: &[u8]) -> String {
        let ext = trim_dot(ext);
        match self {
            Self::Stable => format!("{name}.{ext}"),
            Self::ContentHash => format!("{name}.{}.{ext}", content_hash(content)),
        }
    }
}

/// Truncated BLAKE3 digest of `content`, as lowercase hex.
pub fn content_hash(content: &[u8]) -> String {
    let digest = blake3::hash(content).to_hex();
    digest[..HASH_LEN].to_string()
}

fn trim_dot(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_render_has_no_hash() {
        let name = NamingTemplate::Stable.render("main", "js", b"console.log(1)");
        assert_eq!(name, "main.js");
    }

    #[test]
    fn content_hash_render_embeds_digest() {
        let name = NamingTemplate::ContentHash.render("main", ".js", b"console.log(1)");
        let hash = content_hash(b"console.log(1)");
        assert_eq!(name, format!("main.{hash}.js"));
        assert_eq!(hash.len(), HASH_LEN);
    }

    #[test]
    fn hash_changes_only_with_content() {
        assert_eq!(content_hash(b"a"), content_hash(b"a"));
        assert_ne!(content_hash(b"a"), content_hash(b"b"));
    }

    #[test]
    fn pattern_accepts_placeholder_extension() {
        assert_eq!(
            NamingTemplate::ContentHash.pattern("[ext]"),
            "[name].[contenthash].[ext]"
        );
    }

    #[test]
    fn environment_picks_template() {
        assert_eq!(
            NamingTemplate::for_environment(Environment::Development),
            NamingTemplate::Stable
        );
        assert!(NamingTemplate::for_environment(Environment::Production).includes_hash());
    }
}
