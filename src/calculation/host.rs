//! Host (shared computer) weighting.
//!
//! Blends the stay-day ratio with each member's reported host usage.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::weighting::{Weighting, WeightingInput, describe_amounts};

/// Splits the host bill by stay days and reported usage.
///
/// `amount[m] = total * (stay_weight * stay_ratio[m] + usage_weight * usage[m])`
/// with weights 0.7 and 0.3 by default. Requires `hostUsageRatio`; a member
/// absent from it has a usage ratio of zero, and a negative ratio is
/// rejected.
pub fn split_host(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let usage = input
        .settings
        .host_usage_ratio
        .as_ref()
        .ok_or_else(|| EngineError::MissingSetting {
            expense_type: "host".to_string(),
            field: "hostUsageRatio".to_string(),
        })?;

    let weights = &input.policy.host;
    let mut amounts = Vec::with_capacity(input.members.len());
    for member in input.members {
        let usage_ratio = usage.get(&member.id).copied().unwrap_or(Decimal::ZERO);
        if usage_ratio < Decimal::ZERO {
            return Err(EngineError::InvalidSetting {
                field: "hostUsageRatio".to_string(),
                message: format!("usage ratio for '{}' is negative", member.id),
            });
        }

        let stay_ratio = member.stay_days / input.total_stay_days;
        let amount = weights
            .stay_weight
            .checked_mul(stay_ratio)
            .zip(weights.usage_weight.checked_mul(usage_ratio))
            .and_then(|(stay_part, usage_part)| stay_part.checked_add(usage_part))
            .and_then(|blend| input.total_amount.checked_mul(blend))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("host share for '{}' is out of range", member.id),
            })?;
        amounts.push(amount);
    }

    let reasoning = format!(
        "{} split {} by stay ratio and {} by host usage: {}",
        input.total_amount,
        weights.stay_weight.normalize(),
        weights.usage_weight.normalize(),
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        "host",
        "Host Usage",
        serde_json::json!({
            "stay_weight": weights.stay_weight.normalize().to_string(),
            "usage_weight": weights.usage_weight.normalize().to_string(),
            "host_usage_ratio": usage,
        }),
        amounts,
        reasoning,
    ))
}
