//! Metered utility weighting for water and electricity.
//!
//! A base portion of the bill, sized by the ratio of base to actual usage,
//! is shared equally; the rest follows stay days.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::weighting::{Weighting, WeightingInput, describe_amounts, proportional_share};

struct Meter<'a> {
    rule_id: &'a str,
    rule_name: &'a str,
    base_field: &'a str,
    actual_field: &'a str,
    base: Decimal,
    actual: Decimal,
}

/// Splits the water bill.
///
/// `baseUsage`/`actualUsage` default to the policy values (10/20).
pub fn split_water(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let settings = input.settings;
    let policy = &input.policy.water;

    split_metered(
        input,
        Meter {
            rule_id: "water",
            rule_name: "Water Base and Usage",
            base_field: "baseUsage",
            actual_field: "actualUsage",
            base: settings.base_usage.unwrap_or(policy.base_usage),
            actual: settings.actual_usage.unwrap_or(policy.actual_usage),
        },
    )
}

/// Splits the electricity bill.
///
/// `baseElectricity`/`actualElectricity` default to the policy values
/// (50/150).
pub fn split_electricity(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let settings = input.settings;
    let policy = &input.policy.electricity;

    split_metered(
        input,
        Meter {
            rule_id: "electricity",
            rule_name: "Electricity Base and Usage",
            base_field: "baseElectricity",
            actual_field: "actualElectricity",
            base: settings.base_electricity.unwrap_or(policy.base_electricity),
            actual: settings
                .actual_electricity
                .unwrap_or(policy.actual_electricity),
        },
    )
}

fn split_metered(input: &WeightingInput<'_>, meter: Meter<'_>) -> EngineResult<Weighting> {
    if meter.actual <= Decimal::ZERO {
        return Err(EngineError::InvalidSetting {
            field: meter.actual_field.to_string(),
            message: format!("must be positive, got {}", meter.actual),
        });
    }
    if meter.base < Decimal::ZERO || meter.base > meter.actual {
        return Err(EngineError::InvalidSetting {
            field: meter.base_field.to_string(),
            message: format!(
                "must be between 0 and {} ({}), got {}",
                meter.actual_field, meter.actual, meter.base
            ),
        });
    }

    let base_amount = proportional_share(input.total_amount, meter.base, meter.actual)?;
    let extra_amount = input.total_amount - base_amount;
    let base_share = base_amount / Decimal::from(input.members.len());

    let amounts = input
        .members
        .iter()
        .map(|m| {
            proportional_share(extra_amount, m.stay_days, input.total_stay_days)
                .map(|stay_share| base_share + stay_share)
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let reasoning = format!(
        "base {} ({}/{}) shared equally, remaining {} by stay days: {}",
        base_amount.round_dp(4).normalize(),
        meter.base.normalize(),
        meter.actual.normalize(),
        extra_amount.round_dp(4).normalize(),
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        meter.rule_id,
        meter.rule_name,
        serde_json::json!({
            "base": meter.base.normalize().to_string(),
            "actual": meter.actual.normalize().to_string(),
            "base_amount": base_amount.normalize().to_string(),
            "extra_amount": extra_amount.normalize().to_string(),
        }),
        amounts,
        reasoning,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::weighting::tests::{dec, input, members};
    use crate::config::PolicyConfig;
    use crate::models::CustomSettings;

    #[test]
    fn test_water_defaults_share_half_equally() {
        // base 100 * 10/20 = 50 -> 25 each; extra 50 by 3:1
        let members = members(&[("a", "30"), ("b", "10")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_water(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("62.5"), dec("37.5")]);
        assert_eq!(weighting.audit_step.rule_id, "water");
    }

    #[test]
    fn test_electricity_defaults_share_third_equally() {
        // base 300 * 50/150 = 100 -> 50 each; extra 200 by 3:1
        let members = members(&[("a", "30"), ("b", "10")]);
        let settings = CustomSettings::default();
        let policy = PolicyConfig::default();

        let weighting = split_electricity(&input(&members, 300, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("200"), dec("100")]);
        assert_eq!(weighting.audit_step.rule_id, "electricity");
    }

    #[test]
    fn test_settings_override_meter_readings() {
        let members = members(&[("a", "1"), ("b", "0")]);
        let settings = CustomSettings {
            base_usage: Some(dec("20")),
            actual_usage: Some(dec("20")),
            ..CustomSettings::default()
        };
        let policy = PolicyConfig::default();

        let weighting = split_water(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("50"), dec("50")]);
    }

    #[test]
    fn test_zero_base_is_pure_stay_ratio() {
        let members = members(&[("a", "1"), ("b", "3")]);
        let settings = CustomSettings {
            base_electricity: Some(Decimal::ZERO),
            ..CustomSettings::default()
        };
        let policy = PolicyConfig::default();

        let weighting = split_electricity(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("25"), dec("75")]);
    }

    #[test]
    fn test_huge_meter_readings_keep_their_ratio() {
        let members = members(&[("a", "1"), ("b", "1")]);
        let settings = CustomSettings {
            base_usage: Some(dec("10000000000000000000000000000")),
            actual_usage: Some(dec("20000000000000000000000000000")),
            ..CustomSettings::default()
        };
        let policy = PolicyConfig::default();

        let weighting = split_water(&input(&members, 100, &settings, &policy)).unwrap();

        assert_eq!(weighting.amounts, vec![dec("50"), dec("50")]);
    }

    #[test]
    fn test_zero_actual_usage_is_rejected() {
        let members = members(&[("a", "1")]);
        let settings = CustomSettings {
            actual_usage: Some(Decimal::ZERO),
            ..CustomSettings::default()
        };
        let policy = PolicyConfig::default();

        let result = split_water(&input(&members, 100, &settings, &policy));

        match result {
            Err(EngineError::InvalidSetting { field, .. }) => assert_eq!(field, "actualUsage"),
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_base_above_actual_is_rejected() {
        let members = members(&[("a", "1")]);
        let settings = CustomSettings {
            base_electricity: Some(dec("200")),
            ..CustomSettings::default()
        };
        let policy = PolicyConfig::default();

        let result = split_electricity(&input(&members, 100, &settings, &policy));

        match result {
            Err(EngineError::InvalidSetting { field, .. }) => {
                assert_eq!(field, "baseElectricity")
            }
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }
}
