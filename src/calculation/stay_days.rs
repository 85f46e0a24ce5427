//! Stay-day adjustment from leave records.
//!
//! Applies leave-of-absence records to an occupancy map, lowering the daily
//! stay fraction of each day the leave covers within the billing period.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::LeavePolicy;
use crate::models::{BillingPeriod, LeaveRecord, OccupancyMap};

use super::leave_days::calculate_leave_days;

/// Stay fraction assumed for a day with no recorded occupancy.
pub const DEFAULT_STAY_FRACTION: Decimal = Decimal::ONE;

/// Applies leave records to an occupancy map.
///
/// For each record, the credited absence days (see
/// [`calculate_leave_days`]) are spread evenly over the leave's full span,
/// giving a daily fraction. Every day of the leave that also lies in the
/// billing period has that fraction subtracted from the member's stay value,
/// floored at zero. A day with no recorded value starts from
/// [`DEFAULT_STAY_FRACTION`]. A member not yet in the map gets an entry once
/// one of their leave days falls in the period.
///
/// The input map is left untouched; a new map is returned. Records whose end
/// precedes their start, or that miss the period entirely, are skipped.
///
/// # Examples
///
/// ```
/// use split_engine::calculation::update_stay_days_by_leave_records;
/// use split_engine::config::LeavePolicy;
/// use split_engine::models::{BillingPeriod, LeaveRecord, LeaveType, OccupancyMap};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
/// let period = BillingPeriod::new(day(1), day(31))?;
/// let leave = LeaveRecord {
///     member_id: "m1".to_string(),
///     start_date: day(10),
///     end_date: day(11),
///     leave_type: LeaveType::Personal,
/// };
///
/// let updated = update_stay_days_by_leave_records(
///     &OccupancyMap::new(),
///     &[leave],
///     &period,
///     &LeavePolicy::default(),
/// );
///
/// assert_eq!(updated["m1"][&day(10)], Decimal::ZERO);
/// assert_eq!(updated["m1"][&day(11)], Decimal::ZERO);
/// # Ok::<(), split_engine::error::EngineError>(())
/// ```
pub fn update_stay_days_by_leave_records(
    stay_days: &OccupancyMap,
    leave_records: &[LeaveRecord],
    period: &BillingPeriod,
    policy: &LeavePolicy,
) -> OccupancyMap {
    let mut updated = stay_days.clone();

    for record in leave_records {
        let span_days = record.span_days();
        if span_days <= 0 {
            warn!(
                member_id = %record.member_id,
                start_date = %record.start_date,
                end_date = %record.end_date,
                "Skipping leave record that ends before it starts"
            );
            continue;
        }

        let overlap = period.clip(record.start_date, record.end_date);
        if overlap.len() == 0 {
            debug!(
                member_id = %record.member_id,
                start_date = %record.start_date,
                end_date = %record.end_date,
                "Skipping leave record outside the billing period"
            );
            continue;
        }

        let leave_days = calculate_leave_days(record, policy);
        let daily_fraction = Decimal::from(leave_days) / Decimal::from(span_days);

        let member_days = updated.entry(record.member_id.clone()).or_default();
        for date in overlap {
            let current = member_days
                .get(&date)
                .copied()
                .unwrap_or(DEFAULT_STAY_FRACTION);
            member_days.insert(date, (current - daily_fraction).max(Decimal::ZERO));
        }

        debug!(
            member_id = %record.member_id,
            leave_type = %record.leave_type,
            leave_days,
            daily_fraction = %daily_fraction,
            "Applied leave record"
        );
    }

    updated
}
