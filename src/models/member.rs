//! Member model and occupancy map types.
//!
//! A [`Member`] is an occupant together with the stay days aggregated over
//! the billing period under computation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-member, per-date stay fractions.
///
/// Maps member ID to a map of date to the fraction (`0..=1`) of that day the
/// member was present. Dates serialize as `YYYY-MM-DD` keys.
pub type OccupancyMap = BTreeMap<String, BTreeMap<NaiveDate, Decimal>>;

/// Represents an occupant taking part in a split.
///
/// # Example
///
/// ```
/// use split_engine::models::Member;
/// use rust_decimal::Decimal;
///
/// let member = Member::new("room_101_a", Decimal::from(30));
/// assert_eq!(member.id, "room_101_a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier for the member.
    pub id: String,
    /// Aggregate stay days within the billing period.
    pub stay_days: Decimal,
}

impl Member {
    /// Creates a member with the given aggregate stay days.
    pub fn new(id: impl Into<String>, stay_days: Decimal) -> Self {
        Self {
            id: id.into(),
            stay_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_member_with_camel_case_field() {
        let json = r#"{"id": "m1", "stayDays": 12.5}"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.id, "m1");
        assert_eq!(member.stay_days, Decimal::new(125, 1));
    }

    #[test]
    fn test_occupancy_map_uses_iso_date_keys() {
        let mut days = BTreeMap::new();
        days.insert(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), Decimal::ONE);
        let mut map = OccupancyMap::new();
        map.insert("m1".to_string(), days);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["m1"]["2025-03-01"], "1");
    }
}
