//! Split orchestration.
//!
//! Validates the members and total of a bill, dispatches to the weighting
//! strategy for its expense type and reconciles the rounded result.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CustomSettings, Expense, ExpenseType, Member, SplitOutcome};

use super::reconcile::reconcile;
use super::weighting::{BUILTIN_STRATEGIES, StrategyRegistry, WeightingInput, checked_sum};

/// Splits a bill between members using the built-in strategies.
///
/// See [`calculate_with_registry`] for the validation and dispatch rules.
///
/// # Examples
///
/// ```
/// use split_engine::calculation::calculate_by_stay_days;
/// use split_engine::config::PolicyConfig;
/// use split_engine::models::{CustomSettings, ExpenseType, Member};
/// use rust_decimal::Decimal;
///
/// let members = vec![
///     Member::new("a", Decimal::from(5)),
///     Member::new("b", Decimal::from(3)),
///     Member::new("c", Decimal::from(2)),
/// ];
///
/// let outcome = calculate_by_stay_days(
///     &members,
///     100,
///     &ExpenseType::Lighting,
///     &CustomSettings::default(),
///     &PolicyConfig::default(),
/// )?;
///
/// assert_eq!(outcome.share("a"), Some(50));
/// assert_eq!(outcome.share("b"), Some(30));
/// assert_eq!(outcome.share("c"), Some(20));
/// # Ok::<(), split_engine::error::EngineError>(())
/// ```
pub fn calculate_by_stay_days(
    members: &[Member],
    total_amount: i64,
    expense_type: &ExpenseType,
    settings: &CustomSettings,
    policy: &PolicyConfig,
) -> EngineResult<SplitOutcome> {
    calculate_with_registry(
        members,
        total_amount,
        expense_type,
        settings,
        policy,
        &BUILTIN_STRATEGIES,
    )
}

/// Splits an [`Expense`] between members using the built-in strategies.
pub fn calculate_expense(
    expense: &Expense,
    members: &[Member],
    policy: &PolicyConfig,
) -> EngineResult<SplitOutcome> {
    calculate_by_stay_days(
        members,
        expense.total_amount,
        &expense.expense_type,
        &expense.custom_settings,
        policy,
    )
}

/// Splits a bill between members using the given strategy registry.
///
/// Fails fast, in this order, when:
/// - `members` is empty,
/// - `total_amount` is not positive,
/// - a member has negative stay days or an ID seen earlier in the list,
/// - the stay days sum to zero.
///
/// The strategy registered for `expense_type` (or the stay-day fallback)
/// produces unrounded shares; a strategy failure is returned as is.
/// Otherwise the shares are rounded and reconciled so they sum exactly to
/// `total_amount`.
pub fn calculate_with_registry(
    members: &[Member],
    total_amount: i64,
    expense_type: &ExpenseType,
    settings: &CustomSettings,
    policy: &PolicyConfig,
    registry: &StrategyRegistry,
) -> EngineResult<SplitOutcome> {
    let total_stay_days = validate(members, total_amount).inspect_err(|err| {
        warn!(expense_type = %expense_type, error = %err, "Rejected split input");
    })?;

    debug!(
        expense_type = %expense_type,
        total_amount,
        member_count = members.len(),
        total_stay_days = %total_stay_days,
        custom_strategy = registry.contains(expense_type),
        "Dispatching split"
    );

    let input = WeightingInput {
        members,
        total_amount: Decimal::from(total_amount),
        total_stay_days,
        settings,
        policy,
        step_number: 1,
    };
    let weighting = registry.resolve(expense_type)(&input).inspect_err(|err| {
        warn!(expense_type = %expense_type, error = %err, "Weighting strategy failed");
    })?;

    let mut outcome = reconcile(
        members,
        &weighting.amounts,
        total_amount,
        weighting.rounding_rule,
        weighting.audit_step.step_number + 1,
    )?;
    outcome.audit_trace.insert(0, weighting.audit_step);

    Ok(outcome)
}

/// Checks the split input, returning the total stay days.
fn validate(members: &[Member], total_amount: i64) -> EngineResult<Decimal> {
    if members.is_empty() {
        return Err(EngineError::EmptyMembers);
    }
    if total_amount <= 0 {
        return Err(EngineError::NonPositiveTotal { total_amount });
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if member.stay_days < Decimal::ZERO {
            return Err(EngineError::InvalidMember {
                member_id: member.id.clone(),
                message: format!("stay days cannot be negative, got {}", member.stay_days),
            });
        }
        if !seen.insert(member.id.as_str()) {
            return Err(EngineError::DuplicateMember {
                member_id: member.id.clone(),
            });
        }
    }

    let total_stay_days = checked_sum(members.iter().map(|m| &m.stay_days))?;
    if total_stay_days <= Decimal::ZERO {
        return Err(EngineError::ZeroStayDays);
    }

    Ok(total_stay_days)
}
