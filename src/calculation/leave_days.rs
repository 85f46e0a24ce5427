//! Leave-day crediting.
//!
//! Converts a leave-of-absence record into the number of days credited as
//! absence, according to the leave type.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::LeavePolicy;
use crate::models::{LeaveRecord, LeaveType};

/// Calculates the absence days credited for a leave record.
///
/// The leave spans `end - start + 1` days. Personal and other leave are
/// credited in full. Home leave longer than the policy threshold (3 days by
/// default) is credited at the reduction factor (80% by default), rounded
/// up; shorter home leave is credited in full.
///
/// A record whose end precedes its start yields a non-positive count; such
/// records are the caller's to reject.
///
/// # Examples
///
/// ```
/// use split_engine::calculation::calculate_leave_days;
/// use split_engine::config::LeavePolicy;
/// use split_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let record = LeaveRecord {
///     member_id: "m1".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     leave_type: LeaveType::Home,
/// };
///
/// // ceil(10 * 0.8) = 8
/// assert_eq!(calculate_leave_days(&record, &LeavePolicy::default()), 8);
/// ```
pub fn calculate_leave_days(record: &LeaveRecord, policy: &LeavePolicy) -> i64 {
    let total_days = record.span_days();

    match record.leave_type {
        LeaveType::Personal | LeaveType::Other => total_days,
        LeaveType::Home if total_days > policy.home_threshold_days => {
            let credited = (Decimal::from(total_days) * policy.home_reduction_factor).ceil();
            credited.to_i64().unwrap_or(total_days)
        }
        LeaveType::Home => total_days,
    }
}
