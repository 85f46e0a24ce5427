//! Configuration types for apportionment policy.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from `policy.yaml`. Every field has a default, so a partial
//! file (or none at all) yields the standard dormitory policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::RoundingRule;

/// Rounding defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingPolicy {
    /// The rule used when an expense does not override it.
    pub default_rule: RoundingRule,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            default_rule: RoundingRule::Ceil,
        }
    }
}

/// Leave-of-absence crediting policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeavePolicy {
    /// Home leave longer than this many days is only partially credited.
    pub home_threshold_days: i64,
    /// Fraction of a long home leave credited as absence.
    pub home_reduction_factor: Decimal,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            home_threshold_days: 3,
            home_reduction_factor: Decimal::new(8, 1),
        }
    }
}

/// Weights for the shared host (computer) expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPolicy {
    /// Weight of the stay-day ratio.
    pub stay_weight: Decimal,
    /// Weight of the reported host usage ratio.
    pub usage_weight: Decimal,
}

impl Default for HostPolicy {
    fn default() -> Self {
        Self {
            stay_weight: Decimal::new(7, 1),
            usage_weight: Decimal::new(3, 1),
        }
    }
}

/// Air conditioner policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirConditionerPolicy {
    /// Minimum number of days every member is charged for.
    pub min_usage_days: Decimal,
}

impl Default for AirConditionerPolicy {
    fn default() -> Self {
        Self {
            min_usage_days: Decimal::from(15),
        }
    }
}

/// Water policy: a base share split equally, the rest by occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterPolicy {
    /// Base usage shared equally.
    pub base_usage: Decimal,
    /// Actual metered usage.
    pub actual_usage: Decimal,
}

impl Default for WaterPolicy {
    fn default() -> Self {
        Self {
            base_usage: Decimal::from(10),
            actual_usage: Decimal::from(20),
        }
    }
}

/// Electricity policy: a base share split equally, the rest by occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricityPolicy {
    /// Base consumption shared equally.
    pub base_electricity: Decimal,
    /// Actual metered consumption.
    pub actual_electricity: Decimal,
}

impl Default for ElectricityPolicy {
    fn default() -> Self {
        Self {
            base_electricity: Decimal::from(50),
            actual_electricity: Decimal::from(150),
        }
    }
}

/// The complete apportionment policy.
///
/// Per-expense `CustomSettings` take precedence over these values; the
/// policy only supplies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Rounding defaults.
    pub rounding: RoundingPolicy,
    /// Leave crediting.
    pub leave: LeavePolicy,
    /// Host expense weights.
    pub host: HostPolicy,
    /// Air conditioner minimum usage.
    pub air_conditioner: AirConditionerPolicy,
    /// Water base/actual usage.
    pub water: WaterPolicy,
    /// Electricity base/actual consumption.
    pub electricity: ElectricityPolicy,
}
