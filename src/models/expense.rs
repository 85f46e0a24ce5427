//! Expense model: expense types, rounding rules and per-expense settings.

use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A category of shared cost.
///
/// Each built-in category has its own weighting policy. Any other name is
/// kept as [`ExpenseType::Other`] and split by the plain stay-day ratio
/// unless a strategy has been registered for it.
///
/// # Example
///
/// ```
/// use split_engine::models::ExpenseType;
///
/// assert_eq!("air_conditioner".parse::<ExpenseType>().unwrap(), ExpenseType::AirConditioner);
/// assert_eq!(ExpenseType::from("gas"), ExpenseType::Other("gas".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseType {
    /// Lighting, split purely by stay days.
    Lighting,
    /// The shared host computer, weighted by stay days and reported usage.
    Host,
    /// Air conditioning, with a minimum number of charged days.
    AirConditioner,
    /// Water, with an equally shared base usage.
    Water,
    /// Electricity, with an equally shared base consumption.
    Electricity,
    /// Internet, split equally.
    Internet,
    /// A user-defined rule chosen through the custom settings.
    Custom,
    /// Any other expense name.
    Other(String),
}

impl ExpenseType {
    /// Returns the wire name of the expense type.
    pub fn as_str(&self) -> &str {
        match self {
            ExpenseType::Lighting => "lighting",
            ExpenseType::Host => "host",
            ExpenseType::AirConditioner => "air_conditioner",
            ExpenseType::Water => "water",
            ExpenseType::Electricity => "electricity",
            ExpenseType::Internet => "internet",
            ExpenseType::Custom => "custom",
            ExpenseType::Other(name) => name,
        }
    }
}

impl From<&str> for ExpenseType {
    fn from(name: &str) -> Self {
        match name {
            "lighting" => ExpenseType::Lighting,
            "host" => ExpenseType::Host,
            "air_conditioner" => ExpenseType::AirConditioner,
            "water" => ExpenseType::Water,
            "electricity" => ExpenseType::Electricity,
            "internet" => ExpenseType::Internet,
            "custom" => ExpenseType::Custom,
            other => ExpenseType::Other(other.to_string()),
        }
    }
}

impl From<String> for ExpenseType {
    fn from(name: String) -> Self {
        ExpenseType::from(name.as_str())
    }
}

impl From<ExpenseType> for String {
    fn from(expense_type: ExpenseType) -> Self {
        match expense_type {
            ExpenseType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ExpenseType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ExpenseType::from(s))
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How unrounded shares are brought to whole minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingRule {
    /// Round up.
    #[default]
    Ceil,
    /// Round down.
    Floor,
    /// Round to nearest, halves away from zero.
    Round,
}

impl RoundingRule {
    /// Rounds an amount to a whole number under this rule.
    ///
    /// # Example
    ///
    /// ```
    /// use split_engine::models::RoundingRule;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::new(3350, 2); // 33.50
    /// assert_eq!(RoundingRule::Ceil.apply(amount), Decimal::from(34));
    /// assert_eq!(RoundingRule::Floor.apply(amount), Decimal::from(33));
    /// assert_eq!(RoundingRule::Round.apply(amount), Decimal::from(34));
    /// ```
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            RoundingRule::Ceil => amount.ceil(),
            RoundingRule::Floor => amount.floor(),
            RoundingRule::Round => {
                amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }
}

impl std::fmt::Display for RoundingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingRule::Ceil => write!(f, "ceil"),
            RoundingRule::Floor => write!(f, "floor"),
            RoundingRule::Round => write!(f, "round"),
        }
    }
}

/// Per-expense settings; which fields matter depends on the expense type.
///
/// Unset fields fall back to the policy defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSettings {
    /// Overrides the policy's default rounding rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding_rule: Option<RoundingRule>,
    /// Host: reported usage ratio per member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_usage_ratio: Option<HashMap<String, Decimal>>,
    /// Air conditioner: minimum charged days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_usage_days: Option<Decimal>,
    /// Water: base usage shared equally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_usage: Option<Decimal>,
    /// Water: actual metered usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_usage: Option<Decimal>,
    /// Electricity: base consumption shared equally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_electricity: Option<Decimal>,
    /// Electricity: actual metered consumption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_electricity: Option<Decimal>,
    /// Custom: one of `stay_days_only`, `equal_share`, `custom_ratio`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rule: Option<String>,
    /// Custom: weight per member for `custom_ratio`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ratio: Option<HashMap<String, Decimal>>,
}

/// A shared bill to be split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The expense category.
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    /// The bill total in minor currency units.
    pub total_amount: i64,
    /// Category-specific settings.
    #[serde(default)]
    pub custom_settings: CustomSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_expense_type_names_round_trip() {
        for name in [
            "lighting",
            "host",
            "air_conditioner",
            "water",
            "electricity",
            "internet",
            "custom",
            "gas",
        ] {
            let parsed: ExpenseType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
            assert_eq!(String::from(parsed), name);
        }
    }

    #[test]
    fn test_unknown_expense_type_is_other() {
        assert_eq!(
            ExpenseType::from("rent"),
            ExpenseType::Other("rent".to_string())
        );
    }

    #[test]
    fn test_ceil_rounds_up_fractions() {
        assert_eq!(RoundingRule::Ceil.apply(dec("33.0001")), dec("34"));
        assert_eq!(RoundingRule::Ceil.apply(dec("33")), dec("33"));
    }

    #[test]
    fn test_floor_rounds_down_fractions() {
        assert_eq!(RoundingRule::Floor.apply(dec("33.9999")), dec("33"));
    }

    #[test]
    fn test_round_halves_go_up_for_positive_amounts() {
        assert_eq!(RoundingRule::Round.apply(dec("32.5")), dec("33"));
        assert_eq!(RoundingRule::Round.apply(dec("33.5")), dec("34"));
        assert_eq!(RoundingRule::Round.apply(dec("33.49")), dec("33"));
    }

    #[test]
    fn test_default_rounding_rule_is_ceil() {
        assert_eq!(RoundingRule::default(), RoundingRule::Ceil);
    }

    #[test]
    fn test_deserialize_expense_with_camel_case_settings() {
        let json = r#"{
            "type": "host",
            "totalAmount": 12000,
            "customSettings": {
                "roundingRule": "floor",
                "hostUsageRatio": {"a": 0.75, "b": 0.25}
            }
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.expense_type, ExpenseType::Host);
        assert_eq!(expense.total_amount, 12000);
        assert_eq!(
            expense.custom_settings.rounding_rule,
            Some(RoundingRule::Floor)
        );
        let ratios = expense.custom_settings.host_usage_ratio.unwrap();
        assert_eq!(ratios["a"], dec("0.75"));
    }

    #[test]
    fn test_deserialize_expense_without_settings() {
        let json = r#"{"type": "internet", "totalAmount": 5000}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.custom_settings, CustomSettings::default());
    }

    #[test]
    fn test_serialize_settings_skips_unset_fields() {
        let settings = CustomSettings {
            custom_rule: Some("equal_share".to_string()),
            ..CustomSettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"customRule":"equal_share"}"#);
    }
}
