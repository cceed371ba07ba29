use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::optimization::MinifyLevel;

// Helper defaults
pub(crate) fn default_context() -> PathBuf {
    PathBuf::from("src")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_entries() -> IndexMap<String, Vec<String>> {
    IndexMap::from([
        (
            "main".to_string(),
            vec!["@babel/polyfill".to_string(), "./index.js".to_string()],
        ),
        ("analytics".to_string(), vec!["./analytics.js".to_string()]),
    ])
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string()]
}

pub(crate) fn default_aliases() -> IndexMap<String, PathBuf> {
    IndexMap::from([
        ("@models".to_string(), PathBuf::from("src/models")),
        ("@".to_string(), PathBuf::from("src")),
    ])
}

pub(crate) fn default_html_template() -> PathBuf {
    PathBuf::from("./index.html")
}

pub(crate) fn default_favicon() -> PathBuf {
    PathBuf::from("src/assets/favicon.ico")
}

pub(crate) fn default_css_public_path() -> String {
    "../".to_string()
}

pub(crate) fn default_script_minify() -> MinifyLevel {
    MinifyLevel::Identifiers
}

/// Accepts a level name or `true`. Production always minifies scripts, so a
/// disabled level is rejected.
pub(crate) fn deserialize_minify_level<'de, D>(deserializer: D) -> Result<MinifyLevel, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Level(String),
    }

    let raw = match Raw::deserialize(deserializer)? {
        Raw::Flag(flag) => flag.to_string(),
        Raw::Level(level) => level,
    };
    let level = MinifyLevel::parse(&raw).map_err(serde::de::Error::custom)?;
    if !level.is_enabled() {
        return Err(serde::de::Error::custom(
            "script_minify cannot disable minification; use whitespace, syntax or identifiers",
        ));
    }
    Ok(level)
}
