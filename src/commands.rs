use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::{OrgResolver, RunConfig, DATE_FORMAT};
use crate::github::client::SearchClient;
use crate::github::query::{build_query, build_web_url};
use crate::github::search::fetch_all_results;
use crate::github::types::{GitHubItem, ItemKind};
use crate::graph::aggregate::aggregate;
use crate::graph::render::render_graph;
use crate::output;
use crate::summarize::{split_entries, Summarizer};

fn search_url(kind: ItemKind, login: &str, org: &str, cfg: &RunConfig) -> String {
    format!("search/issues?q={}", build_query(kind, login, org, &cfg.since))
}

fn parse_since(since: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(since, DATE_FORMAT)
        .with_context(|| format!("invalid since date '{since}': expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

async fn fetch_kind<C: SearchClient>(
    client: &C,
    kind: ItemKind,
    login: &str,
    org: &str,
    cfg: &RunConfig,
) -> Result<Vec<GitHubItem>> {
    let url = search_url(kind, login, org, cfg);
    if cfg.debug {
        eprintln!("Calling GitHub API with URL: {url}");
    }
    fetch_all_results(client, &url, cfg.debug).await
}

/// The `graph` command: fetch PRs and issues for the author, aggregate into
/// weekly buckets, and render the histogram. Returns the stdout text.
pub async fn run_graph<C: SearchClient>(
    client: &C,
    username: Option<String>,
    cfg: &RunConfig,
    orgs: &dyn OrgResolver,
) -> Result<String> {
    let login = match username {
        Some(login) => login,
        None => client
            .current_login()
            .await
            .context("Error resolving authenticated user")?,
    };
    let org = cfg.effective_org(orgs);

    let prs = fetch_kind(client, ItemKind::PullRequest, &login, &org, cfg)
        .await
        .context("Error fetching pull requests for graph")?;
    let issues = fetch_kind(client, ItemKind::Issue, &login, &org, cfg)
        .await
        .context("Error fetching issues for graph")?;

    if prs.is_empty() && issues.is_empty() {
        return Ok(format!(
            "No contributions found for user '{login}' in the '{org}' organization since {}.\n",
            cfg.since
        ));
    }

    let since = parse_since(&cfg.since)?;
    let today = Utc::now();
    let graph = aggregate(&prs, &issues, since, today);

    let mut out = render_graph(&graph);
    out.push('\n');
    out.push_str(&format!(
        "View issues in GitHub: {}\n",
        build_web_url(ItemKind::Issue, &login, &org, &cfg.since)
    ));
    Ok(out)
}

/// The `pulls` command: list pull requests as CSV, or bodies with --body-only.
pub async fn run_pulls<C: SearchClient>(
    client: &C,
    username: &str,
    cfg: &RunConfig,
    orgs: &dyn OrgResolver,
) -> Result<String> {
    run_listing(client, ItemKind::PullRequest, username, cfg, orgs).await
}

/// The `issues` command: list issues as CSV, or bodies with --body-only.
pub async fn run_issues<C: SearchClient>(
    client: &C,
    username: &str,
    cfg: &RunConfig,
    orgs: &dyn OrgResolver,
) -> Result<String> {
    run_listing(client, ItemKind::Issue, username, cfg, orgs).await
}

async fn run_listing<C: SearchClient>(
    client: &C,
    kind: ItemKind,
    login: &str,
    cfg: &RunConfig,
    orgs: &dyn OrgResolver,
) -> Result<String> {
    let org = cfg.effective_org(orgs);
    let items = fetch_kind(client, kind, login, &org, cfg)
        .await
        .with_context(|| format!("Error fetching {}", kind.human()))?;

    if items.is_empty() {
        return Ok(format!(
            "No {} found for user '{login}' in the '{org}' organization.\n",
            kind.human()
        ));
    }

    if cfg.body_only {
        return Ok(output::format_bodies(&items, kind));
    }
    output::items_to_csv(&items)
}

/// The `all` command: both kinds, combined into one CSV with a Type column.
pub async fn run_all<C: SearchClient>(
    client: &C,
    username: &str,
    cfg: &RunConfig,
    orgs: &dyn OrgResolver,
) -> Result<String> {
    let org = cfg.effective_org(orgs);
    let prs = fetch_kind(client, ItemKind::PullRequest, username, &org, cfg)
        .await
        .context("Error fetching pull requests")?;
    let issues = fetch_kind(client, ItemKind::Issue, username, &org, cfg)
        .await
        .context("Error fetching issues")?;

    if cfg.body_only {
        let mut out = output::format_bodies(&prs, ItemKind::PullRequest);
        out.push_str(&output::format_bodies(&issues, ItemKind::Issue));
        return Ok(out);
    }
    output::combined_csv(&prs, &issues)
}

/// The `summarize` command: split the input into entries and summarize each.
/// A failed entry logs to stderr and processing continues with the rest.
pub async fn run_summarize<S: Summarizer>(summarizer: &S, input: &str) -> Result<String> {
    let mut out = String::new();
    for entry in split_entries(input) {
        match summarizer.summarize(entry).await {
            Ok(summary) => {
                out.push_str(&summary);
                out.push('\n');
            }
            Err(e) => {
                eprintln!("Error summarizing entry: {e:#}");
            }
        }
    }
    Ok(out)
}
