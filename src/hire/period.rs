//! Hire periods and whole-day duration arithmetic.
//!
//! Durations are counted in calendar days between two dates, so a period that
//! crosses a daylight-saving change still counts whole days.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date format used by the client date picker.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// The date range a product is hired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HirePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl HirePeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Parse both ends of a period. Returns `None` if either date is unparseable.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Number of whole calendar days hired. Zero or negative for reversed periods.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// A period is billable only when it ends after it starts.
    pub fn is_billable(&self) -> bool {
        self.days() > 0
    }
}

/// Parse a date as entered by a customer.
///
/// Accepts `YYYY-MM-DD`, naive date-times and RFC 3339 timestamps. Any time
/// component is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Hire dates exactly as captured from the add-to-cart form.
///
/// Kept as text so the cart shows what the customer entered; parsed into a
/// [`HirePeriod`] on every pricing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HireDates {
    pub start: String,
    pub end: String,
}

impl HireDates {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Capture dates from optional form fields. Both must be present.
    pub fn capture(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self::new(sanitize_text(start), sanitize_text(end))),
            _ => None,
        }
    }

    pub fn period(&self) -> Option<HirePeriod> {
        HirePeriod::parse(&self.start, &self.end)
    }
}

/// Clean a single-line text field: drops markup and control characters,
/// collapses whitespace runs and trims.
pub fn sanitize_text(raw: &str) -> String {
    let mut without_tags = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => without_tags.push(' '),
            c => without_tags.push(c),
        }
    }

    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}
