//! Trip date range validation

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Result, TripCastError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated trip window: `today <= start <= end`, span within the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate two `YYYY-MM-DD` strings against `today` and the maximum span.
    ///
    /// Checks run in order and the first failure wins: both dates parse,
    /// start is not before today, end is not before start, inclusive span
    /// is at most `max_days`.
    pub fn parse(start: &str, end: &str, today: NaiveDate, max_days: u32) -> Result<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end, today, max_days)
    }

    /// Validate an already parsed pair
    pub fn new(start: NaiveDate, end: NaiveDate, today: NaiveDate, max_days: u32) -> Result<Self> {
        if start < today {
            return Err(TripCastError::StartInPast { start, today });
        }
        if end < start {
            return Err(TripCastError::EndBeforeStart { start, end });
        }

        let days = span_days(start, end);
        if days > i64::from(max_days) {
            return Err(TripCastError::RangeTooLong { days, max_days });
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive number of days in the range
    #[must_use]
    pub fn days(&self) -> i64 {
        span_days(self.start, self.end)
    }

    /// Start date as sent to the forecast provider
    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| TripCastError::invalid_date(input))
}

fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
