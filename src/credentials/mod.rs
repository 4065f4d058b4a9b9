use anyhow::{bail, Context, Result};
use std::process::Command;

/// Line prefix the token sits behind in `gh auth status --show-token` output.
const TOKEN_PREFIX: &str = "  - Token:";

/// Source of a GitHub token, injected so the summarizer can be tested without
/// a gh installation.
pub trait TokenFetcher {
    fn fetch_token(&self) -> Result<String>;
}

/// Fetches the token by shelling out to the gh CLI.
pub struct GhCliTokenFetcher;

impl TokenFetcher for GhCliTokenFetcher {
    fn fetch_token(&self) -> Result<String> {
        let output = Command::new("gh")
            .args(["auth", "status", "--show-token"])
            .output()
            .context("error running gh auth status")?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_token_output(&stdout)
    }
}

fn parse_token_output(output: &str) -> Result<String> {
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix(TOKEN_PREFIX) {
            let token = rest.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }
    bail!("github token not found in auth status output")
}

/// Resolve a token for API access: GITHUB_TOKEN or GH_TOKEN from the
/// environment first, then the gh CLI.
pub fn resolve_token() -> Result<String> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(value) = std::env::var(var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }
    GhCliTokenFetcher.fetch_token()
}
