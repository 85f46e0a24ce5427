//! Expense-type weighting strategies and their registry.
//!
//! Every strategy shares the signature [`WeightingStrategy`]: it takes the
//! members, total and settings of a split and returns each member's
//! unrounded amount, in member order, together with the rounding rule to
//! apply and an audit step. The [`StrategyRegistry`] maps expense types to
//! strategies, so new types are added by registration rather than by
//! touching the split orchestrator.

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CustomSettings, ExpenseType, Member, RoundingRule};

use super::air_conditioner::split_air_conditioner;
use super::custom::split_custom;
use super::host::split_host;
use super::internet::split_internet;
use super::lighting::split_by_stay_days;
use super::metered::{split_electricity, split_water};

/// Everything a weighting strategy sees.
#[derive(Debug, Clone, Copy)]
pub struct WeightingInput<'a> {
    /// The members, in the caller's order.
    pub members: &'a [Member],
    /// The bill total in minor currency units.
    pub total_amount: Decimal,
    /// Sum of the members' stay days; always positive.
    pub total_stay_days: Decimal,
    /// The expense's custom settings.
    pub settings: &'a CustomSettings,
    /// Policy defaults for settings the expense leaves unset.
    pub policy: &'a PolicyConfig,
    /// The audit step number to record.
    pub step_number: u32,
}

impl WeightingInput<'_> {
    /// The rounding rule: the expense override, else the policy default.
    pub fn rounding_rule(&self) -> RoundingRule {
        self.settings
            .rounding_rule
            .unwrap_or(self.policy.rounding.default_rule)
    }

    /// Each member's share of the bill by stay days alone.
    pub fn stay_day_amounts(&self) -> EngineResult<Vec<Decimal>> {
        self.members
            .iter()
            .map(|m| proportional_share(self.total_amount, m.stay_days, self.total_stay_days))
            .collect()
    }

    /// The bill divided equally between the members.
    pub fn equal_amounts(&self) -> Vec<Decimal> {
        let share = self.total_amount / Decimal::from(self.members.len());
        vec![share; self.members.len()]
    }
}

/// The unrounded result of a weighting strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighting {
    /// Unrounded amount per member, in member order.
    pub amounts: Vec<Decimal>,
    /// The rounding rule the reconciler applies.
    pub rounding_rule: RoundingRule,
    /// The audit step recording the weighting.
    pub audit_step: AuditStep,
}

impl Weighting {
    /// Builds a weighting and its audit step.
    pub(crate) fn new(
        input: &WeightingInput<'_>,
        rule_id: &str,
        rule_name: &str,
        parameters: Value,
        amounts: Vec<Decimal>,
        reasoning: String,
    ) -> Self {
        let shares: Map<String, Value> = input
            .members
            .iter()
            .zip(&amounts)
            .map(|(m, amount)| (m.id.clone(), Value::String(amount.normalize().to_string())))
            .collect();

        let audit_step = AuditStep {
            step_number: input.step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "total_amount": input.total_amount.to_string(),
                "total_stay_days": input.total_stay_days.normalize().to_string(),
                "member_count": input.members.len(),
                "parameters": parameters,
            }),
            output: Value::Object(shares),
            reasoning,
        };

        Self {
            amounts,
            rounding_rule: input.rounding_rule(),
            audit_step,
        }
    }
}

/// Sums decimals, failing instead of overflowing.
pub(crate) fn checked_sum<'a>(
    values: impl IntoIterator<Item = &'a Decimal>,
) -> EngineResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| EngineError::CalculationError {
            message: "sum of weights is out of range".to_string(),
        })
}

/// Returns `total * weight / total_weight`.
///
/// The product is taken first to keep exact quotients exact. When it does
/// not fit, the ratio `weight / total_weight` is taken first instead, so
/// only the relative size of the weights matters.
pub(crate) fn proportional_share(
    total: Decimal,
    weight: Decimal,
    total_weight: Decimal,
) -> EngineResult<Decimal> {
    total
        .checked_mul(weight)
        .and_then(|product| product.checked_div(total_weight))
        .or_else(|| {
            weight
                .checked_div(total_weight)
                .and_then(|ratio| ratio.checked_mul(total))
        })
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("cannot weight {} by {}/{}", total, weight, total_weight),
        })
}

/// Splits `total` in proportion to `weights`.
pub(crate) fn proportional_amounts(
    total: Decimal,
    weights: &[Decimal],
) -> EngineResult<Vec<Decimal>> {
    let total_weight = checked_sum(weights)?;
    weights
        .iter()
        .map(|w| proportional_share(total, *w, total_weight))
        .collect()
}

/// The uniform signature of a weighting strategy.
pub type WeightingStrategy = fn(&WeightingInput<'_>) -> EngineResult<Weighting>;

/// The built-in registry, shared by every split that does not bring its own.
pub static BUILTIN_STRATEGIES: LazyLock<StrategyRegistry> = LazyLock::new(StrategyRegistry::builtin);

/// Maps expense types to weighting strategies.
///
/// Types without a registered strategy use the fallback, which splits by
/// stay days.
///
/// # Example
///
/// ```
/// use split_engine::calculation::{StrategyRegistry, WeightingInput, Weighting};
/// use split_engine::error::EngineResult;
/// use split_engine::models::ExpenseType;
///
/// fn split_gas(input: &WeightingInput<'_>) -> EngineResult<Weighting> {
///     // Gas is shared equally in this dormitory.
///     (StrategyRegistry::builtin().resolve(&ExpenseType::Internet))(input)
/// }
///
/// let mut registry = StrategyRegistry::builtin();
/// registry.register(ExpenseType::from("gas"), split_gas);
/// assert!(registry.contains(&ExpenseType::from("gas")));
/// ```
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<ExpenseType, WeightingStrategy>,
    fallback: WeightingStrategy,
}

impl StrategyRegistry {
    /// A registry with no strategies; everything uses the fallback.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: split_by_stay_days,
        }
    }

    /// A registry with every built-in expense type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ExpenseType::Lighting, split_by_stay_days);
        registry.register(ExpenseType::Host, split_host);
        registry.register(ExpenseType::AirConditioner, split_air_conditioner);
        registry.register(ExpenseType::Water, split_water);
        registry.register(ExpenseType::Electricity, split_electricity);
        registry.register(ExpenseType::Internet, split_internet);
        registry.register(ExpenseType::Custom, split_custom);
        registry
    }

    /// Registers a strategy, returning the one it replaced.
    pub fn register(
        &mut self,
        expense_type: ExpenseType,
        strategy: WeightingStrategy,
    ) -> Option<WeightingStrategy> {
        self.strategies.insert(expense_type, strategy)
    }

    /// Returns true if the type has its own strategy.
    pub fn contains(&self, expense_type: &ExpenseType) -> bool {
        self.strategies.contains_key(expense_type)
    }

    /// Returns the strategy for a type, or the fallback.
    pub fn resolve(&self, expense_type: &ExpenseType) -> WeightingStrategy {
        self.strategies
            .get(expense_type)
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Formats unrounded amounts for audit reasoning, e.g. `a=50, b=30`.
pub(crate) fn describe_amounts(members: &[Member], amounts: &[Decimal]) -> String {
    members
        .iter()
        .zip(amounts)
        .map(|(m, amount)| format!("{}={}", m.id, amount.round_dp(4).normalize()))
        .collect::<Vec<_>>()
        .join(", ")
}
