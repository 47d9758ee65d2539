// src/domain/filter.rs

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::domain::user::UserRecord;

/// Inclusive creation-date window. A missing side is unbounded.
///
/// Both sides are calendar days in UTC: `start` begins at midnight and `end`
/// covers its whole day, so a record created at 23:59 on `end` is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let after_start = self
            .start
            .map_or(true, |start| *at >= start.and_time(NaiveTime::MIN).and_utc());
        let before_end = self.end.map_or(true, |end| match end.checked_add_days(Days::new(1)) {
            Some(next) => *at < next.and_time(NaiveTime::MIN).and_utc(),
            None => true,
        });
        after_start && before_end
    }
}

/// Keeps the records created inside `range`, in their original order.
pub fn filter_by_date<'a>(records: &'a [UserRecord], range: &DateRange) -> Vec<&'a UserRecord> {
    if range.is_unbounded() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|user| range.contains(&user.created_at))
        .collect()
}

/// Cap on how many filtered records go into an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordLimit {
    #[default]
    All,
    Count(NonZeroUsize),
}

impl RecordLimit {
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        match self {
            RecordLimit::All => items,
            RecordLimit::Count(n) => items.into_iter().take(n.get()).collect(),
        }
    }
}

impl FromStr for RecordLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(RecordLimit::All);
        }
        s.parse::<NonZeroUsize>()
            .map(RecordLimit::Count)
            .map_err(|_| format!("record limit must be \"all\" or a positive integer, got {s:?}"))
    }
}

impl fmt::Display for RecordLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLimit::All => write!(f, "all"),
            RecordLimit::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Filter by date, then keep the first `limit` records.
pub fn select_for_export<'a>(
    records: &'a [UserRecord],
    range: &DateRange,
    limit: RecordLimit,
) -> Vec<&'a UserRecord> {
    limit.apply(filter_by_date(records, range))
}
