use serde::Deserialize;

/// The two contribution kinds the search API distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    PullRequest,
    Issue,
}

impl ItemKind {
    /// Search qualifier for this kind ("is:pr" / "is:issue")
    pub fn search_term(self) -> &'static str {
        match self {
            ItemKind::PullRequest => "is:pr",
            ItemKind::Issue => "is:issue",
        }
    }

    /// Plural display name used in summary lines
    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::PullRequest => "PRs",
            ItemKind::Issue => "Issues",
        }
    }

    /// Lowercase human name used in error and empty-state messages
    pub fn human(self) -> &'static str {
        match self {
            ItemKind::PullRequest => "pull requests",
            ItemKind::Issue => "issues",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Open,
    Closed,
}

/// One issue or pull request as returned by the search API.
///
/// Date fields stay as raw strings: bucketing resolves them through a fallback
/// chain and must survive values that do not parse as RFC 3339.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubItem {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub repository: RepositoryRef,
}

impl GitHubItem {
    pub fn item_state(&self) -> ItemState {
        if self.state.eq_ignore_ascii_case("closed") {
            ItemState::Closed
        } else {
            ItemState::Open
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryRef {
    #[serde(default)]
    pub name: String,
}

/// One page of search results, plus the API's total-count hint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<GitHubItem>,
}
