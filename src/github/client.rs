use anyhow::{anyhow, Context, Result};
use octocrab::Octocrab;
use serde::Deserialize;

use crate::github::types::SearchResponse;

/// The slice of the GitHub API this tool needs. Commands are generic over this
/// trait so tests can substitute canned responses for the live client.
pub trait SearchClient {
    /// Fetch one page of search results from a relative API path
    /// (e.g. "search/issues?q=...&page=1&per_page=100").
    fn search_page(&self, path: &str) -> impl std::future::Future<Output = Result<SearchResponse>>;

    /// Resolve the login of the currently authenticated user.
    fn current_login(&self) -> impl std::future::Future<Output = Result<String>>;
}

/// Create an authenticated octocrab client from a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// Live GitHub API client backed by octocrab's raw REST access.
pub struct GitHubClient {
    inner: Octocrab,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            inner: create_client(token)?,
        })
    }
}

impl SearchClient for GitHubClient {
    async fn search_page(&self, path: &str) -> Result<SearchResponse> {
        let route = format!("/{}", path.trim_start_matches('/'));
        self.inner
            .get(&route, None::<&()>)
            .await
            .map_err(|e| anyhow!("GitHub API error: {e}"))
    }

    async fn current_login(&self) -> Result<String> {
        let user: UserResponse = self
            .inner
            .get("/user", None::<&()>)
            .await
            .map_err(|e| anyhow!("GitHub API error: {e}"))?;
        Ok(user.login)
    }
}
