//! Billing period model and inclusive date ranges.
//!
//! This module contains the [`BillingPeriod`] type that bounds an
//! occupancy computation, and [`DateRange`], the immutable sequence of
//! calendar days used wherever the engine walks dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive, restartable sequence of calendar days.
///
/// Iteration consumes a copy of the bounds, so cloning a range (or calling
/// [`BillingPeriod::days`] again) always starts from the first day.
///
/// # Example
///
/// ```
/// use split_engine::models::date_range;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
///
/// let days: Vec<_> = date_range(start, end).map(|d| d.to_string()).collect();
/// assert_eq!(days, vec!["2025-02-27", "2025-02-28", "2025-03-01"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

/// Returns the days from `start` to `end`, both inclusive.
///
/// An inverted range (`end < start`) is empty.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        next: (start <= end).then_some(start),
        end,
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self
            .next
            .map(|d| (self.end - d).num_days() as usize + 1)
            .unwrap_or(0);
        (len, Some(len))
    }
}

impl ExactSizeIterator for DateRange {}

/// Represents the billing period an occupancy computation covers.
///
/// # Example
///
/// ```
/// use split_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let period = BillingPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// )?;
///
/// assert_eq!(period.day_count(), 31);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
/// # Ok::<(), split_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBillingPeriod")]
pub struct BillingPeriod {
    /// The start date of the billing period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the billing period (inclusive).
    pub end_date: NaiveDate,
}

/// Unchecked wire form of a [`BillingPeriod`].
#[derive(Deserialize)]
struct RawBillingPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawBillingPeriod> for BillingPeriod {
    type Error = EngineError;

    fn try_from(raw: RawBillingPeriod) -> Result<Self, Self::Error> {
        BillingPeriod::new(raw.start_date, raw.end_date)
    }
}

impl BillingPeriod {
    /// Creates a billing period, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns every day of the period in order.
    pub fn days(&self) -> DateRange {
        date_range(self.start_date, self.end_date)
    }

    /// Returns the number of days in the period.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns the part of `[start, end]` that falls within this period.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> DateRange {
        date_range(start.max(self.start_date), end.min(self.end_date))
    }
}
