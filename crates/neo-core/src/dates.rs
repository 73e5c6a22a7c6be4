use crate::error::{NeoError, Result};
use chrono::{Local, NaiveDate};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default span cap, matching the upstream feed's own limit.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 7;

/// Inclusive calendar range a plot is requested for.
///
/// Both ends are parsed dates, so their rendered form is always
/// `YYYY-MM-DD` and safe to put in a URL query or a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(NeoError::InvalidRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from raw form or CLI input.
    ///
    /// A blank side mirrors the other side; both blank means today.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::parse_on(start, end, Local::now().date_naive())
    }

    /// Like [`DateRange::parse`], with an explicit date standing in for today.
    pub fn parse_on(start: &str, end: &str, today: NaiveDate) -> Result<Self> {
        let (start, end) = match (start.trim(), end.trim()) {
            ("", "") => return Self::new(today, today),
            ("", end) => (end, end),
            (start, "") => (start, start),
            (start, end) => (start, end),
        };
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Reject ranges longer than `max_days` days.
    pub fn within(self, max_days: u32) -> Result<Self> {
        let days = self.span_days();
        if days > i64::from(max_days) {
            return Err(NeoError::SpanTooLong {
                days,
                max: max_days,
            });
        }
        Ok(self)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days between start and end (0 for a single-day range).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// `plot_{start}_to_{end}.png`
    pub fn plot_file_name(&self) -> String {
        format!("plot_{}_to_{}.png", self.start_param(), self.end_param())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_param(), self.end_param())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| NeoError::InvalidDate(raw.to_string()))
}
