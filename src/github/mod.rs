pub mod client;
pub mod query;
pub mod search;
pub mod types;

pub use client::{create_client, GitHubClient, SearchClient};
pub use query::{build_query, build_web_url};
pub use search::fetch_all_results;
pub use types::{GitHubItem, ItemKind, ItemState, SearchResponse};
