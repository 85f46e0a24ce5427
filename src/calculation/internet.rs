//! Internet weighting: an equal split.

use crate::error::EngineResult;

use super::weighting::{Weighting, WeightingInput, describe_amounts};

/// Splits the bill equally, regardless of stay days.
pub fn split_internet(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
    let amounts = input.equal_amounts();
    let reasoning = format!(
        "{} split equally between {} members: {}",
        input.total_amount,
        input.members.len(),
        describe_amounts(input.members, &amounts)
    );

    Ok(Weighting::new(
        input,
        "internet",
        "Internet Equal Share",
        serde_json::json!({}),
        amounts,
        reasoning,
    ))
}
