//! Leave-of-absence records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::billing_period::{DateRange, date_range};

/// The category of a leave of absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Personal leave, credited in full.
    Personal,
    /// Going home; long trips are only partially credited.
    Home,
    /// Anything else, credited in full.
    Other,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Personal => write!(f, "personal"),
            LeaveType::Home => write!(f, "home"),
            LeaveType::Other => write!(f, "other"),
        }
    }
}

/// A member-reported absence interval.
///
/// # Example
///
/// ```
/// use split_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let record = LeaveRecord {
///     member_id: "m1".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     leave_type: LeaveType::Home,
/// };
/// assert_eq!(record.span_days(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    /// The member on leave.
    pub member_id: String,
    /// First day of the leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive).
    pub end_date: NaiveDate,
    /// The leave category.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
}

impl LeaveRecord {
    /// Number of calendar days the leave covers, counting both ends.
    ///
    /// Zero or negative when the end date precedes the start date.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// The days covered by the leave.
    pub fn days(&self) -> DateRange {
        date_range(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_leave_record() {
        let json = r#"{
            "memberId": "m2",
            "startDate": "2025-03-01",
            "endDate": "2025-03-03",
            "type": "home"
        }"#;

        let record: LeaveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.member_id, "m2");
        assert_eq!(record.leave_type, LeaveType::Home);
        assert_eq!(record.span_days(), 3);
        assert_eq!(record.days().count(), 3);
    }

    #[test]
    fn test_unknown_leave_type_is_rejected() {
        let json = r#"{
            "memberId": "m2",
            "startDate": "2025-03-01",
            "endDate": "2025-03-03",
            "type": "sabbatical"
        }"#;

        assert!(serde_json::from_str::<LeaveRecord>(json).is_err());
    }

    #[test]
    fn test_inverted_record_has_non_positive_span() {
        let record = LeaveRecord {
            member_id: "m1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            leave_type: LeaveType::Personal,
        };

        assert_eq!(record.span_days(), -1);
        assert_eq!(record.days().count(), 0);
    }

    #[test]
    fn test_leave_type_display() {
        assert_eq!(LeaveType::Personal.to_string(), "personal");
        assert_eq!(LeaveType::Home.to_string(), "home");
        assert_eq!(LeaveType::Other.to_string(), "other");
    }
}
