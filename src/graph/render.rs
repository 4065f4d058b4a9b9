use crate::graph::aggregate::{ContributionGraph, Tally};

pub const GLYPH_PR_CLOSED: &str = "•";
pub const GLYPH_PR_OPEN: &str = "○";
pub const GLYPH_ISSUE_CLOSED: &str = "■";
pub const GLYPH_ISSUE_OPEN: &str = "□";

/// Render the weekly histogram, legend, and summary statistics.
///
/// Each week line carries one glyph per contribution in fixed category order;
/// a zero week still renders its label so gaps stay visible. The legend only
/// lists categories that were fetched and actually occurred.
pub fn render_graph(graph: &ContributionGraph) -> String {
    let mut out = String::new();

    for bucket in graph.buckets() {
        let tally = graph.tallies.get(&bucket.index).copied().unwrap_or_default();
        out.push_str(&bucket.label());
        out.push_str(": ");
        out.push_str(&GLYPH_PR_CLOSED.repeat(tally.pr_closed as usize));
        out.push_str(&GLYPH_PR_OPEN.repeat(tally.pr_open as usize));
        out.push_str(&GLYPH_ISSUE_CLOSED.repeat(tally.issue_closed as usize));
        out.push_str(&GLYPH_ISSUE_OPEN.repeat(tally.issue_open as usize));
        out.push('\n');
    }

    let totals = graph.totals();

    out.push('\n');
    out.push_str(&render_legend(graph, &totals));
    out.push('\n');
    out.push('\n');
    out.push_str(&render_summary(graph, &totals));
    out
}

fn render_legend(graph: &ContributionGraph, totals: &Tally) -> String {
    let mut entries = Vec::new();
    if graph.has_prs && totals.pr_closed > 0 {
        entries.push(format!("{GLYPH_PR_CLOSED} = Closed PR"));
    }
    if graph.has_prs && totals.pr_open > 0 {
        entries.push(format!("{GLYPH_PR_OPEN} = Open PR"));
    }
    if graph.has_issues && totals.issue_closed > 0 {
        entries.push(format!("{GLYPH_ISSUE_CLOSED} = Closed Issue"));
    }
    if graph.has_issues && totals.issue_open > 0 {
        entries.push(format!("{GLYPH_ISSUE_OPEN} = Open Issue"));
    }
    format!("Legend: {}", entries.join("  "))
}

fn render_summary(graph: &ContributionGraph, totals: &Tally) -> String {
    let total = totals.total();
    let days_active = graph.days_active().max(1);
    let average = f64::from(total) / days_active as f64;

    format!(
        "Total Contributions: {total}\n\
         PRs: {} total ({} closed, {} open)\n\
         Issues: {} total ({} closed, {} open)\n\
         Average per day: {average:.2}\n",
        totals.pr_closed + totals.pr_open,
        totals.pr_closed,
        totals.pr_open,
        totals.issue_closed + totals.issue_open,
        totals.issue_closed,
        totals.issue_open,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::GitHubItem;
    use crate::graph::aggregate::aggregate;
    use chrono::{DateTime, NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn item(state: &str, created_at: &str, closed_at: Option<&str>) -> GitHubItem {
        GitHubItem {
            state: state.to_string(),
            created_at: created_at.to_string(),
            closed_at: closed_at.map(str::to_string),
            ..Default::default()
        }
    }

    /// Since 2025-04-15, today 2025-05-15: 3 PRs and 3 issues spread over
    /// weeks 1-3 as {closed, open, closed} each.
    fn basic_graph() -> crate::graph::aggregate::ContributionGraph {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        let prs = vec![
            item("closed", "2025-04-17T12:00:00Z", Some("2025-04-18T12:00:00Z")),
            item("open", "2025-04-25T12:00:00Z", None),
            item("closed", "2025-04-30T12:00:00Z", Some("2025-05-02T12:00:00Z")),
        ];
        let issues = vec![
            item("closed", "2025-04-17T12:00:00Z", Some("2025-04-18T12:00:00Z")),
            item("open", "2025-04-25T12:00:00Z", None),
            item("closed", "2025-04-30T12:00:00Z", Some("2025-05-02T12:00:00Z")),
        ];
        aggregate(&prs, &issues, since, today)
    }

    #[test]
    fn test_basic_scenario_week_lines() {
        let output = render_graph(&basic_graph());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Week  1 (Apr 15 - Apr 21): •■");
        assert_eq!(lines[1], "Week  2 (Apr 22 - Apr 28): ○□");
        assert_eq!(lines[2], "Week  3 (Apr 29 - May 05): •■");
        // Gap weeks render their label with an empty glyph run
        assert_eq!(lines[3], "Week  4 (May 06 - May 12): ");
        assert_eq!(lines[4], "Week  5 (May 13 - May 15): ");
        assert_eq!(lines[5], "");
    }

    #[test]
    fn test_basic_scenario_legend_and_summary() {
        let output = render_graph(&basic_graph());
        assert!(output.contains("Legend: • = Closed PR  ○ = Open PR  ■ = Closed Issue  □ = Open Issue"));
        assert!(output.contains("Total Contributions: 6"));
        assert!(output.contains("PRs: 3 total (2 closed, 1 open)"));
        assert!(output.contains("Issues: 3 total (2 closed, 1 open)"));
        // 6 contributions over 31 days
        assert!(output.contains("Average per day: 0.19"));
    }

    #[test]
    fn test_glyph_order_within_a_week() {
        let since = date(2025, 4, 15);
        let today = date(2025, 4, 20);
        let prs = vec![
            item("closed", "2025-04-16T00:00:00Z", Some("2025-04-16T06:00:00Z")),
            item("open", "2025-04-16T00:00:00Z", None),
        ];
        let issues = vec![
            item("closed", "2025-04-16T00:00:00Z", Some("2025-04-16T06:00:00Z")),
            item("open", "2025-04-16T00:00:00Z", None),
        ];
        let output = render_graph(&aggregate(&prs, &issues, since, today));
        assert!(output.starts_with("Week  1 (Apr 15 - Apr 20): •○■□\n"));
    }

    #[test]
    fn test_legend_suppresses_unfetched_kind() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        let issues = vec![
            item("closed", "2025-04-17T12:00:00Z", Some("2025-04-18T12:00:00Z")),
            item("open", "2025-04-25T12:00:00Z", None),
        ];
        let output = render_graph(&aggregate(&[], &issues, since, today));

        assert!(!output.contains(GLYPH_PR_CLOSED));
        assert!(!output.contains(GLYPH_PR_OPEN));
        assert!(output.contains("Legend: ■ = Closed Issue  □ = Open Issue"));
        assert!(output.contains("PRs: 0 total (0 closed, 0 open)"));
        assert!(output.contains("Issues: 2 total (1 closed, 1 open)"));
    }

    #[test]
    fn test_legend_suppresses_zero_count_category() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        // Only open PRs: the closed-PR legend entry must not appear
        let prs = vec![item("open", "2025-04-25T12:00:00Z", None)];
        let output = render_graph(&aggregate(&prs, &[], since, today));

        let legend = output
            .lines()
            .find(|l| l.starts_with("Legend:"))
            .unwrap();
        assert_eq!(legend, "Legend: ○ = Open PR");
    }

    #[test]
    fn test_gap_filled_line_count() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        let output = render_graph(&aggregate(&[], &[], since, today));
        let week_lines = output.lines().take_while(|l| l.starts_with("Week")).count();
        assert_eq!(week_lines, 5);
    }
}
