//! Air conditioner weighting.
//!
//! Every member is charged for at least a minimum number of days, since the
//! unit runs whether or not they are in the room.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::weighting::{
    Weighting, WeightingInput, checked_sum, describe_amounts, proportional_share,
};

/// Splits the bill by stay days raised to a minimum.
///
/// `effective[m] = max(stay_days[m], min_usage_days)`, and the bill is split
/// in proportion to `effective`. `minUsageDays` defaults to the policy value
/// (15).
pub fn split_air_conditioner(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let min_usage_days = input
        .settings
        .min_usage_days
        .unwrap_or(input.policy.air_conditioner.min_usage_days);

    let effective_days: Vec<Decimal> = input
        .members
        .iter()
        .map(|m| m.stay_days.max(min_usage_days))
        .collect();
    let total_effective = checked_sum(&effective_days)?;

    if total_effective <= Decimal::ZERO {
        return Err(EngineError::InvalidSetting {
            field: "minUsageDays".to_string(),
            message: "effective usage days sum to zero".to_string(),
        });
    }

    let amounts = effective_days
        .iter()
        .map(|days| proportional_share(input.total_amount, *days, total_effective))
        .collect::<EngineResult<Vec<_>>>()?;

    let reasoning = format!(
        "{} split by effective days (minimum {}) over {} total: {}",
        input.total_amount,
        min_usage_days.normalize(),
        total_effective.normalize(),
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        "air_conditioner",
        "Air Conditioner Minimum Usage",
        serde_json::json!({
            "min_usage_days": min_usage_days.normalize().to_string(),
            "total_effective_days": total_effective.normalize().to_string(),
        }),
        amounts,
        reasoning,
    ))
}
