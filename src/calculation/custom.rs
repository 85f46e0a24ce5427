//! User-defined custom weighting rules.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::weighting::{
    Weighting, WeightingInput, checked_sum, describe_amounts, proportional_amounts,
};

/// The sub-rules a custom expense may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomRule {
    /// Split by stay days.
    StayDaysOnly,
    /// Split equally.
    EqualShare,
    /// Split by the weights in `customRatio`.
    CustomRatio,
}

impl FromStr for CustomRule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stay_days_only" => Ok(CustomRule::StayDaysOnly),
            "equal_share" => Ok(CustomRule::EqualShare),
            "custom_ratio" => Ok(CustomRule::CustomRatio),
            other => Err(EngineError::UnknownCustomRule {
                rule: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CustomRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomRule::StayDaysOnly => write!(f, "stay_days_only"),
            CustomRule::EqualShare => write!(f, "equal_share"),
            CustomRule::CustomRatio => write!(f, "custom_ratio"),
        }
    }
}

/// Splits the bill by the rule named in `customRule`.
///
/// `custom_ratio` normalizes `customRatio` by the sum of the members'
/// weights, so only relative magnitudes matter; a member absent from the
/// map has weight zero.
pub fn split_custom(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let rule: CustomRule = input
        .settings
        .custom_rule
        .as_deref()
        .ok_or_else(|| EngineError::MissingSetting {
            expense_type: "custom".to_string(),
            field: "customRule".to_string(),
        })?
        .parse()?;

    let (amounts, parameters) = match rule {
        CustomRule::StayDaysOnly => (input.stay_day_amounts()?, serde_json::json!({})),
        CustomRule::EqualShare => (input.equal_amounts(), serde_json::json!({})),
        CustomRule::CustomRatio => {
            let weights = ratio_weights(input)?;
            let total_weight = checked_sum(&weights)?;
            (
                proportional_amounts(input.total_amount, &weights)?,
                serde_json::json!({"total_weight": total_weight.normalize().to_string()}),
            )
        }
    };

    let reasoning = format!(
        "{} split by custom rule '{}': {}",
        input.total_amount,
        rule,
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        &format!("custom_{}", rule),
        "Custom Rule",
        parameters,
        amounts,
        reasoning,
    ))
}

fn ratio_weights(input: &WeightingInput<'_>) -> EngineResult<Vec<Decimal>> {
    let ratios = input
        .settings
        .custom_ratio
        .as_ref()
        .ok_or_else(|| EngineError::MissingSetting {
            expense_type: "custom".to_string(),
            field: "customRatio".to_string(),
        })?;

    let mut weights = Vec::with_capacity(input.members.len());
    for member in input.members {
        let weight = ratios.get(&member.id).copied().unwrap_or(Decimal::ZERO);
        if weight < Decimal::ZERO {
            return Err(EngineError::InvalidSetting {
                field: "customRatio".to_string(),
                message: format!("weight for '{}' is negative", member.id),
            });
        }
        weights.push(weight);
    }

    if weights.iter().all(|w| w.is_zero()) {
        return Err(EngineError::InvalidSetting {
            field: "customRatio".to_string(),
            message: "weights sum to zero".to_string(),
        });
    }

    Ok(weights)
}
