mod schema;

pub use schema::{ExtensionConfig, GhConfig};

use std::fs;
use std::path::PathBuf;

use chrono::{Duration, Utc};

/// Organization used when neither the flag nor the config file provides one.
pub const DEFAULT_ORG: &str = "github";

/// Model used when neither the flag nor the config file provides one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Flag and config date format (e.g. 2025-04-15).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension key under `extensions:` in the gh config file.
const EXTENSION_NAME: &str = "gh-contrib";

/// Default since-date: 30 days before invocation.
pub fn default_since() -> String {
    (Utc::now() - Duration::days(30)).format(DATE_FORMAT).to_string()
}

/// Immutable per-invocation settings, built once from the CLI flags and
/// passed by reference into the command handlers.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub since: String,
    pub debug: bool,
    pub body_only: bool,
    pub org_override: Option<String>,
    pub model_override: Option<String>,
}

impl RunConfig {
    /// Effective organization: flag > config file > default.
    pub fn effective_org(&self, resolver: &dyn OrgResolver) -> String {
        if let Some(org) = self.org_override.as_deref() {
            if !org.is_empty() {
                return org.to_string();
            }
        }
        resolver.org().unwrap_or_else(|| DEFAULT_ORG.to_string())
    }

    /// Effective model: flag > config file > default.
    pub fn effective_model(&self, resolver: &dyn ModelResolver) -> String {
        if let Some(model) = self.model_override.as_deref() {
            if !model.is_empty() {
                return model.to_string();
            }
        }
        resolver.model().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

/// Source of the configured organization, injected so tests can substitute
/// fixed values for the config file.
pub trait OrgResolver {
    fn org(&self) -> Option<String>;
}

/// Source of the configured summarization model.
pub trait ModelResolver {
    fn model(&self) -> Option<String>;
}

/// Reads extension settings out of the gh CLI config file. Missing or
/// unparseable files resolve to nothing; the precedence chain then falls
/// through to the defaults.
pub struct GhConfigFile {
    path: PathBuf,
}

impl GhConfigFile {
    /// Locate the config file: $GH_CONFIG_PATH if set, else
    /// ~/.config/gh/config.yml.
    pub fn locate() -> Self {
        let path = match std::env::var("GH_CONFIG_PATH") {
            Ok(p) if !p.is_empty() => PathBuf::from(p),
            _ => dirs::home_dir()
                .unwrap_or_default()
                .join(".config")
                .join("gh")
                .join("config.yml"),
        };
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn extension(&self) -> Option<ExtensionConfig> {
        let content = fs::read_to_string(&self.path).ok()?;
        let config: GhConfig = serde_saphyr::from_str(&content).ok()?;
        config.extensions.get(EXTENSION_NAME).cloned()
    }
}

impl OrgResolver for GhConfigFile {
    fn org(&self) -> Option<String> {
        self.extension()?.org.filter(|o| !o.is_empty())
    }
}

impl ModelResolver for GhConfigFile {
    fn model(&self) -> Option<String> {
        self.extension()?.model.filter(|m| !m.is_empty())
    }
}
