use std::collections::HashMap;

use serde::Deserialize;

/// The slice of the gh CLI config file this tool reads. Everything else in
/// the file is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct GhConfig {
    #[serde(default)]
    pub extensions: HashMap<String, ExtensionConfig>,
}

/// Per-extension settings under `extensions: gh-contrib:`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
