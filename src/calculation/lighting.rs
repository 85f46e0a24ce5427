//! Stay-day ratio weighting.
//!
//! Used for lighting and for every expense type without its own strategy.

use crate::error::EngineResult;

use super::weighting::{Weighting, WeightingInput, describe_amounts};

/// Splits the bill in proportion to stay days.
///
/// `amount[m] = total * stay_days[m] / total_stay_days`
pub fn split_by_stay_days(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let amounts = input.stay_day_amounts()?;
    let reasoning = format!(
        "{} split by stay days over {} total days: {}",
        input.total_amount,
        input.total_stay_days.normalize(),
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        "stay_days_ratio",
        "Stay-Day Ratio",
        serde_json::json!({}),
        amounts,
        reasoning,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::weighting::tests::{dec, input, members};
    use crate::config::PolicyConfig;
    use crate::models::{CustomSettings, RoundingRule};

    #[test]
    fn test_split_is_proportional_to_stay_days() {
        let members = members(&[("a", "5"), ("b", "3"), ("c", "2")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_by_stay_days(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("50"), dec("30"), dec("20")]);
        assert_eq!(weighting.rounding_rule, RoundingRule::Ceil);
        assert_eq!(weighting.audit_step.rule_id, "stay_days_ratio");
    }

    #[test]
    fn test_fractional_stay_days() {
        let members = members(&[("a", "0.5"), ("b", "1.5")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_by_stay_days(&input(&members, 1000, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("250"), dec("750")]);
    }

    #[test]
    fn test_member_with_zero_stay_days_owes_nothing() {
        let members = members(&[("a", "0"), ("b", "10")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_by_stay_days(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("0"), dec("100")]);
    }

    #[test]
    fn test_reasoning_mentions_members() {
        let members = members(&[("a", "1"), ("b", "1")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_by_stay_days(&input(&members, 100, &settings, &policy)).unwrap();

        assert!(weighting.audit_step.reasoning.contains("a=50"));
        assert!(weighting.audit_step.reasoning.contains("b=50"));
    }
}
