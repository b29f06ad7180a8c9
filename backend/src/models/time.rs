use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y-%m", "%Y/%m"];

/// Parse an upstream date label into a UTC timestamp.
///
/// Accepts RFC 3339, plain calendar dates and naive date-times; naive values
/// are read as UTC. Returns `None` when no format matches.
pub fn parse_calendar_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(date) = parse_date_only(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

fn parse_date_only(s: &str, fmt: &str) -> Option<NaiveDate> {
    // chrono needs a day field, so year-month labels get the first of the month.
    if fmt.ends_with("%m") {
        let sep = if fmt.contains('/') { '/' } else { '-' };
        return NaiveDate::parse_from_str(&format!("{s}{sep}01"), &format!("{fmt}{sep}%d")).ok();
    }
    NaiveDate::parse_from_str(s, fmt).ok()
}

/// A label paired with its parsed timestamp, ordered chronologically.
///
/// Equal timestamps fall back to the raw text, and labels that do not parse
/// sort after every parseable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel<'a> {
    pub raw: &'a str,
    pub timestamp: Option<DateTime<Utc>>,
}

impl<'a> DateLabel<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            timestamp: parse_calendar_date(raw),
        }
    }
}

impl Ord for DateLabel<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.timestamp, other.timestamp) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.raw.cmp(other.raw)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(other.raw),
        }
    }
}

impl PartialOrd for DateLabel<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
