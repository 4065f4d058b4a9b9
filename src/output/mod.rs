use anyhow::{anyhow, Result};

use crate::github::types::{GitHubItem, ItemKind};

/// Markers delimiting entries in body-only output; the summarize command
/// splits its input on ENTRY_DELIMITER.
pub const ENTRY_DELIMITER: &str = "---END-OF-ENTRY---";
const START_OF_PR: &str = "---START-OF-PR---";
const END_OF_PR: &str = "---END-OF-PR---";
const START_OF_ISSUE: &str = "---START-OF-ISSUE---";
const END_OF_ISSUE: &str = "---END-OF-ISSUE---";

fn markers(kind: ItemKind) -> (&'static str, &'static str) {
    match kind {
        ItemKind::PullRequest => (START_OF_PR, END_OF_PR),
        ItemKind::Issue => (START_OF_ISSUE, END_OF_ISSUE),
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("error flushing CSV output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render items as CSV with URL, Title, State columns. The URL keeps a
/// trailing space so terminals stop the hyperlink before the comma.
pub fn items_to_csv(items: &[GitHubItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["URL", "Title", "State"])?;
    for item in items {
        writer.write_record([
            format!("{} ", item.html_url),
            item.title.clone(),
            item.state.clone(),
        ])?;
    }
    finish_csv(writer)
}

/// Render PRs and issues together as CSV with a leading Type column.
pub fn combined_csv(prs: &[GitHubItem], issues: &[GitHubItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Type", "URL", "Title", "State"])?;
    for pr in prs {
        writer.write_record([
            "Pull Request".to_string(),
            format!("{} ", pr.html_url),
            pr.title.clone(),
            pr.state.clone(),
        ])?;
    }
    for issue in issues {
        writer.write_record([
            "Issue".to_string(),
            format!("{} ", issue.html_url),
            issue.title.clone(),
            issue.state.clone(),
        ])?;
    }
    finish_csv(writer)
}

/// Render item bodies wrapped in per-kind markers, each entry terminated by
/// the entry delimiter so the output can feed straight into `summarize`.
pub fn format_bodies(items: &[GitHubItem], kind: ItemKind) -> String {
    let (start, end) = markers(kind);
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{start}\n{} #{}\n{}\n{end}\n{ENTRY_DELIMITER}\n",
            item.title, item.number, item.body
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pr() -> GitHubItem {
        GitHubItem {
            number: 101,
            title: "Fix login bug".to_string(),
            html_url: "https://github.com/octo/repo/pull/101".to_string(),
            state: "closed".to_string(),
            body: "Repairs the session check.".to_string(),
            ..Default::default()
        }
    }

    fn sample_issue() -> GitHubItem {
        GitHubItem {
            number: 201,
            title: "Login broken".to_string(),
            html_url: "https://github.com/octo/repo/issues/201".to_string(),
            state: "open".to_string(),
            body: "Cannot sign in.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_items_to_csv() {
        let output = items_to_csv(&[sample_pr()]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "URL,Title,State");
        assert_eq!(
            lines[1],
            "https://github.com/octo/repo/pull/101 ,Fix login bug,closed"
        );
    }

    #[test]
    fn test_items_to_csv_quotes_commas() {
        let mut pr = sample_pr();
        pr.title = "Fix login, logout".to_string();
        let output = items_to_csv(&[pr]).unwrap();
        assert!(output.contains("\"Fix login, logout\""));
    }

    #[test]
    fn test_combined_csv() {
        let output = combined_csv(&[sample_pr()], &[sample_issue()]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Type,URL,Title,State");
        assert!(lines[1].starts_with("Pull Request,"));
        assert!(lines[2].starts_with("Issue,"));
    }

    #[test]
    fn test_format_bodies_pr_markers() {
        let output = format_bodies(&[sample_pr()], ItemKind::PullRequest);
        assert_eq!(
            output,
            "---START-OF-PR---\nFix login bug #101\nRepairs the session check.\n---END-OF-PR---\n---END-OF-ENTRY---\n"
        );
    }

    #[test]
    fn test_format_bodies_issue_markers() {
        let output = format_bodies(&[sample_issue()], ItemKind::Issue);
        assert!(output.starts_with("---START-OF-ISSUE---\n"));
        assert!(output.contains("\n---END-OF-ISSUE---\n"));
        assert!(output.ends_with("---END-OF-ENTRY---\n"));
    }
}
