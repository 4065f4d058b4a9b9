use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::github::types::{GitHubItem, ItemKind, ItemState};
use crate::graph::bucket::{effective_date, week_index, WeekBucket, HOURS_PER_WEEK};

/// Per-week counts, one cell per (kind, state) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub pr_closed: u32,
    pub pr_open: u32,
    pub issue_closed: u32,
    pub issue_open: u32,
}

impl Tally {
    fn record(&mut self, kind: ItemKind, state: ItemState) {
        match (kind, state) {
            (ItemKind::PullRequest, ItemState::Closed) => self.pr_closed += 1,
            (ItemKind::PullRequest, ItemState::Open) => self.pr_open += 1,
            (ItemKind::Issue, ItemState::Closed) => self.issue_closed += 1,
            (ItemKind::Issue, ItemState::Open) => self.issue_open += 1,
        }
    }

    fn add(&mut self, other: &Tally) {
        self.pr_closed += other.pr_closed;
        self.pr_open += other.pr_open;
        self.issue_closed += other.issue_closed;
        self.issue_open += other.issue_open;
    }

    pub fn total(&self) -> u32 {
        self.pr_closed + self.pr_open + self.issue_closed + self.issue_open
    }
}

/// The aggregated report: gap-filled weekly tallies keyed by week index, plus
/// the fixed range boundaries the renderer needs for labels and statistics.
///
/// Keying by index rather than by label string keeps bucket identity separate
/// from presentation; the label is computed only at render time.
#[derive(Debug, Clone)]
pub struct ContributionGraph {
    pub since: DateTime<Utc>,
    pub today: DateTime<Utc>,
    pub has_prs: bool,
    pub has_issues: bool,
    pub tallies: BTreeMap<usize, Tally>,
}

impl ContributionGraph {
    /// Buckets in chronological order. Index order is start-date order since
    /// every bucket starts exactly `index` weeks after the since-date.
    pub fn buckets(&self) -> impl Iterator<Item = WeekBucket> + '_ {
        self.tallies
            .keys()
            .map(|&index| WeekBucket::new(index, self.since, self.today))
    }

    /// Sum of all weekly tallies.
    pub fn totals(&self) -> Tally {
        let mut totals = Tally::default();
        for tally in self.tallies.values() {
            totals.add(tally);
        }
        totals
    }

    /// Number of days the report covers, inclusive of both endpoints.
    pub fn days_active(&self) -> i64 {
        (self.today - self.since).num_hours().max(0) / 24 + 1
    }
}

/// Build the full set of week buckets from the since-date through today and
/// tally every item into its week. Weeks with no activity keep their zero
/// tally so the rendered histogram shows gaps instead of skipping them.
///
/// `today` doubles as the processing timestamp: it sizes the bucket range and
/// serves as the final effective-date fallback, so a run is deterministic
/// given its inputs.
pub fn aggregate(
    prs: &[GitHubItem],
    issues: &[GitHubItem],
    since: DateTime<Utc>,
    today: DateTime<Utc>,
) -> ContributionGraph {
    let total_weeks = ((today - since).num_hours().max(0) / HOURS_PER_WEEK) as usize + 1;

    let mut tallies: BTreeMap<usize, Tally> = BTreeMap::new();
    for index in 0..total_weeks {
        tallies.insert(index, Tally::default());
    }

    for item in prs {
        tally_item(&mut tallies, item, ItemKind::PullRequest, since, today);
    }
    for item in issues {
        tally_item(&mut tallies, item, ItemKind::Issue, since, today);
    }

    ContributionGraph {
        since,
        today,
        has_prs: !prs.is_empty(),
        has_issues: !issues.is_empty(),
        tallies,
    }
}

fn tally_item(
    tallies: &mut BTreeMap<usize, Tally>,
    item: &GitHubItem,
    kind: ItemKind,
    since: DateTime<Utc>,
    today: DateTime<Utc>,
) {
    let date = effective_date(item, today);
    let index = week_index(date, since);
    // An index past the pre-sized range still gets a bucket; the item is
    // counted and rendered rather than dropped.
    tallies.entry(index).or_default().record(kind, item.item_state());
}
