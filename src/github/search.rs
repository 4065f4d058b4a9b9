use anyhow::{Context, Result};

use crate::github::client::SearchClient;
use crate::github::types::GitHubItem;

/// Page size requested from the search API; a shorter page ends pagination.
const PAGE_SIZE: usize = 100;

/// Safety valve against runaway pagination when the API misbehaves.
const MAX_PAGES: usize = 10;

/// Fetch every page of results for a search URL, following pagination until a
/// short page or the page cap. Hitting the cap warns on stderr and returns the
/// partial set rather than failing.
pub async fn fetch_all_results<C: SearchClient>(
    client: &C,
    search_url: &str,
    debug: bool,
) -> Result<Vec<GitHubItem>> {
    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        if page > MAX_PAGES {
            eprintln!("Warning: reached maximum page limit ({MAX_PAGES}) for URL: {search_url}");
            break;
        }

        let separator = if search_url.contains('?') { '&' } else { '?' };
        let paginated_url = format!("{search_url}{separator}page={page}&per_page={PAGE_SIZE}");

        if debug {
            eprintln!("Fetching page {page}: {paginated_url}");
        }

        let response = client
            .search_page(&paginated_url)
            .await
            .with_context(|| format!("error fetching page {page} from {paginated_url}"))?;

        if debug {
            eprintln!(
                "Page {page}: found {} items (total_count: {})",
                response.items.len(),
                response.total_count
            );
        }

        let fetched = response.items.len();
        all_items.extend(response.items);

        if fetched < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    Ok(all_items)
}
