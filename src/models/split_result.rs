//! Split result models.
//!
//! This module contains [`SplitOutcome`], the value a successful split
//! produces, its [`AuditStep`] trace, and [`SplitResult`], the
//! discriminated `success`/`message` shape handed to callers that do not
//! branch on a Rust `Result`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RoundingRule;
use crate::error::EngineResult;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of a successful split.
///
/// The rounded `split_amounts` always sum to `total_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutcome {
    /// Each member's share in minor currency units.
    pub split_amounts: BTreeMap<String, i64>,
    /// Each member's share before rounding.
    pub original_amounts: BTreeMap<String, Decimal>,
    /// The rounding rule that was applied.
    pub rounding_rule: RoundingRule,
    /// The bill total in minor currency units.
    pub total_amount: i64,
    /// Weighting and reconciliation steps, in order.
    pub audit_trace: Vec<AuditStep>,
}

impl SplitOutcome {
    /// Returns a member's rounded share.
    pub fn share(&self, member_id: &str) -> Option<i64> {
        self.split_amounts.get(member_id).copied()
    }

    /// Sum of all rounded shares.
    pub fn split_total(&self) -> i64 {
        self.split_amounts.values().sum()
    }
}

/// Discriminated split result: `success: true` with the amounts, or
/// `success: false` with a message.
///
/// # Example
///
/// ```
/// use split_engine::error::EngineError;
/// use split_engine::models::SplitResult;
///
/// let result = SplitResult::from(Err(EngineError::EmptyMembers));
/// assert!(!result.success);
/// assert_eq!(result.message.as_deref(), Some("member list must not be empty"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    /// Whether the split succeeded.
    pub success: bool,
    /// Rounded shares, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_amounts: Option<BTreeMap<String, i64>>,
    /// Unrounded shares, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_amounts: Option<BTreeMap<String, Decimal>>,
    /// The rounding rule applied, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding_rule: Option<RoundingRule>,
    /// The bill total, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
    /// Why the split failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<EngineResult<SplitOutcome>> for SplitResult {
    fn from(result: EngineResult<SplitOutcome>) -> Self {
        match result {
            Ok(outcome) => SplitResult {
                success: true,
                split_amounts: Some(outcome.split_amounts),
                original_amounts: Some(outcome.original_amounts),
                rounding_rule: Some(outcome.rounding_rule),
                total_amount: Some(outcome.total_amount),
                message: None,
            },
            Err(error) => SplitResult {
                success: false,
                split_amounts: None,
                original_amounts: None,
                rounding_rule: None,
                total_amount: None,
                message: Some(error.to_string()),
            },
        }
    }
}
