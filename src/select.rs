//! Milestone selection: UTC day normalization + first qualifying match.

use time::{Date, OffsetDateTime, UtcOffset};
use tracing::warn;

use crate::github::Milestone;

/// Truncate an instant to its UTC calendar day.
///
/// Two instants on the same UTC day compare equal after truncation,
/// regardless of time-of-day or source offset.
pub fn utc_date(ts: OffsetDateTime) -> Date {
    ts.to_offset(UtcOffset::UTC).date()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateRule {
    /// Due exactly on the given day (explicit `dueOnDate`).
    Exact(Date),
    /// Due on or after the given day ("next upcoming").
    OnOrAfter(Date),
}

impl DateRule {
    fn matches(self, due: Date) -> bool {
        match self {
            DateRule::Exact(day) => due == day,
            DateRule::OnOrAfter(day) => due >= day,
        }
    }
}

/// Pick the next release-candidate milestone.
///
/// `milestones` is expected sorted ascending by due date (the listing call
/// requests that ordering), so the first qualifying entry is the soonest
/// one; the list is never re-sorted here. The key match is an unanchored,
/// case-insensitive substring check, which means an empty key matches every
/// title. A milestone without a due date is skipped. `None` is the normal
/// no-match outcome, not an error.
pub fn next_milestone<'a>(
    key: &str,
    milestones: &'a [Milestone],
    target: Option<Date>,
    now: OffsetDateTime,
) -> Option<&'a Milestone> {
    let rule = match target {
        Some(day) => DateRule::Exact(day),
        None => DateRule::OnOrAfter(utc_date(now)),
    };
    let key = key.to_lowercase();
    milestones.iter().find(|m| {
        let Some(due_on) = m.due_on else {
            warn!(title = %m.title, number = m.number, "milestone has no due date, skipping");
            return false;
        };
        rule.matches(utc_date(due_on)) && m.title.to_lowercase().contains(&key)
    })
}
