use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::github::types::ItemKind;

/// Everything except unreserved characters and space gets percent-escaped;
/// space is handled separately so it becomes '+', matching the form encoding
/// GitHub's search URLs use.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

/// Escape a search query as a single unit: unreserved characters pass through,
/// spaces become '+', everything else is percent-encoded.
pub fn query_escape(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_SET)
        .to_string()
        .replace(' ', "+")
}

/// Build the escaped search query for the API. The since clause is only
/// appended when non-empty; escaping always happens after concatenation so
/// characters inside org/author are treated consistently with the rest.
pub fn build_query(kind: ItemKind, author: &str, org: &str, since: &str) -> String {
    let mut query = format!(
        "{} org:{} author:{} sort:created-desc",
        kind.search_term(),
        org,
        author
    );
    if !since.is_empty() {
        query.push_str(&format!(" created:>{since}"));
    }
    query_escape(&query)
}

/// Build the human-facing web URL for the same search, sorted by last update.
pub fn build_web_url(kind: ItemKind, author: &str, org: &str, since: &str) -> String {
    let mut query = format!(
        "{} org:{} author:{} sort:updated-desc",
        kind.search_term(),
        org,
        author
    );
    if !since.is_empty() {
        query.push_str(&format!(" created:>{since}"));
    }
    format!("https://github.com/issues?q={}", query_escape(&query))
}
