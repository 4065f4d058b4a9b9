use chrono::{DateTime, Duration, Utc};

use crate::github::types::GitHubItem;

/// Bucket width used for week indexing.
pub const HOURS_PER_WEEK: i64 = 24 * 7;

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Resolve the date that assigns an item to a week: closed_at when present and
/// parseable, else created_at, else the run's processing timestamp. Each step
/// falls through independently, so a garbled closed_at still tries created_at.
pub fn effective_date(item: &GitHubItem, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(closed) = item.closed_at.as_deref() {
        if let Some(parsed) = parse_rfc3339(closed) {
            return parsed;
        }
    }
    if let Some(parsed) = parse_rfc3339(&item.created_at) {
        return parsed;
    }
    now
}

/// Week index of a date relative to the since-date. Dates before the
/// since-date clamp to bucket 0 instead of producing a negative index.
pub fn week_index(date: DateTime<Utc>, since: DateTime<Utc>) -> usize {
    let hours = (date - since).num_hours();
    if hours < 0 {
        return 0;
    }
    (hours / HOURS_PER_WEEK) as usize
}

/// One week-wide interval of the report range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub index: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekBucket {
    /// Build the bucket for a week index. The end date covers six days past
    /// the start but never runs past today, so a partial final week shows its
    /// real extent.
    pub fn new(index: usize, since: DateTime<Utc>, today: DateTime<Utc>) -> Self {
        let start = since + Duration::weeks(index as i64);
        let end = (start + Duration::days(6)).min(today).max(start);
        Self { index, start, end }
    }

    /// Display label, e.g. "Week  3 (Apr 29 - May 05)". Equal indexes always
    /// produce the identical string; distinct indexes never collide.
    pub fn label(&self) -> String {
        format!(
            "Week {:>2} ({} - {})",
            self.index + 1,
            self.start.format("%b %d"),
            self.end.format("%b %d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn item(created_at: &str, closed_at: Option<&str>) -> GitHubItem {
        GitHubItem {
            created_at: created_at.to_string(),
            closed_at: closed_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_effective_date_prefers_closed_at() {
        let now = date(2025, 5, 15);
        let i = item("2025-04-20T12:00:00Z", Some("2025-04-22T12:00:00Z"));
        assert_eq!(effective_date(&i, now), date(2025, 4, 22) + chrono::Duration::hours(12));
    }

    #[test]
    fn test_effective_date_falls_back_to_created_at() {
        let now = date(2025, 5, 15);
        let open = item("2025-04-25T12:00:00Z", None);
        let empty = item("2025-04-25T12:00:00Z", Some(""));
        let garbled = item("2025-04-25T12:00:00Z", Some("invalid-date"));
        let expected = date(2025, 4, 25) + chrono::Duration::hours(12);
        assert_eq!(effective_date(&open, now), expected);
        assert_eq!(effective_date(&empty, now), expected);
        // A present-but-unparseable closed_at falls through to created_at, not to now
        assert_eq!(effective_date(&garbled, now), expected);
    }

    #[test]
    fn test_effective_date_falls_back_to_now() {
        let now = date(2025, 5, 15);
        let i = item("not-a-date", Some("also-not-a-date"));
        assert_eq!(effective_date(&i, now), now);
    }

    #[test]
    fn test_week_index_boundaries() {
        let since = date(2025, 4, 15);
        assert_eq!(week_index(since, since), 0);
        assert_eq!(week_index(date(2025, 4, 21), since), 0);
        assert_eq!(week_index(date(2025, 4, 22), since), 1);
        assert_eq!(week_index(date(2025, 4, 28), since), 1);
        assert_eq!(week_index(date(2025, 4, 29), since), 2);
        assert_eq!(week_index(date(2025, 5, 15), since), 4);
    }

    #[test]
    fn test_week_index_clamps_negative() {
        let since = date(2025, 4, 15);
        assert_eq!(week_index(date(2025, 4, 1), since), 0);
    }

    #[test]
    fn test_label_format() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        let bucket = WeekBucket::new(2, since, today);
        assert_eq!(bucket.label(), "Week  3 (Apr 29 - May 05)");
    }

    #[test]
    fn test_label_pads_single_digit_week() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        assert!(WeekBucket::new(0, since, today).label().starts_with("Week  1 ("));
    }

    #[test]
    fn test_end_clamped_to_today() {
        let since = date(2025, 4, 15);
        let today = date(2025, 5, 15);
        // Week 5 starts May 13; its natural end (May 19) exceeds today
        let bucket = WeekBucket::new(4, since, today);
        assert_eq!(bucket.end, today);
        assert_eq!(bucket.label(), "Week  5 (May 13 - May 15)");
    }

    #[test]
    fn test_labels_unique_per_index() {
        let since = date(2025, 4, 15);
        let today = date(2025, 7, 15);
        let labels: Vec<String> = (0..13)
            .map(|i| WeekBucket::new(i, since, today).label())
            .collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }
}
