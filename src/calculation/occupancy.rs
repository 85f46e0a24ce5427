//! Occupancy aggregation.
//!
//! Sums a per-day occupancy map over a billing period into the [`Member`]
//! values the split calculation takes.

use rust_decimal::Decimal;

use crate::models::{BillingPeriod, Member, OccupancyMap};

use super::stay_days::DEFAULT_STAY_FRACTION;

/// Aggregates each member's stay fractions over the billing period.
///
/// Every day of the period contributes the recorded fraction, or
/// [`DEFAULT_STAY_FRACTION`] when the day has no entry, matching the
/// baseline the leave adjustment uses. Recorded days outside the period are
/// ignored. Members are returned in ID order.
///
/// # Examples
///
/// ```
/// use split_engine::calculation::aggregate_stay_days;
/// use split_engine::models::{BillingPeriod, OccupancyMap};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
/// let period = BillingPeriod::new(day(1), day(3))?;
/// let map = OccupancyMap::from([(
///     "m1".to_string(),
///     BTreeMap::from([(day(2), Decimal::new(5, 1))]),
/// )]);
///
/// let members = aggregate_stay_days(&map, &period);
/// assert_eq!(members[0].stay_days, Decimal::new(25, 1));
/// # Ok::<(), split_engine::error::EngineError>(())
/// ```
pub fn aggregate_stay_days(occupancy: &OccupancyMap, period: &BillingPeriod) -> Vec<Member> {
    occupancy
        .iter()
        .map(|(member_id, days)| {
            let stay_days: Decimal = period
                .days()
                .map(|date| days.get(&date).copied().unwrap_or(DEFAULT_STAY_FRACTION))
                .sum();
            Member::new(member_id.clone(), stay_days)
        })
        .collect()
}
