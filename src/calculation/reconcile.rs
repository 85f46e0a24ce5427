//! Remainder reconciliation.
//!
//! Rounds unrounded shares to whole minor currency units and redistributes
//! the rounding residue one unit at a time, so the rounded shares sum
//! exactly to the bill total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Member, RoundingRule, SplitOutcome};

/// Rounds shares and reconciles them with the bill total.
///
/// 1. Each amount is rounded under `rounding_rule`, recording the signed
///    remainder `unrounded - rounded`.
/// 2. `difference = total_amount - sum(rounded)`.
/// 3. Members are ordered by remainder, ascending; ties keep input order.
/// 4. The first `|difference|` members in that order get `+1` when the
///    difference is positive, `-1` when it is negative.
/// 5. If the adjusted shares still do not sum to the total, the split fails
///    with [`EngineError::VerificationFailed`].
///
/// # Examples
///
/// ```
/// use split_engine::calculation::reconcile;
/// use split_engine::models::{Member, RoundingRule};
/// use rust_decimal::Decimal;
///
/// let members: Vec<Member> = ["a", "b", "c"]
///     .into_iter()
///     .map(|id| Member::new(id, Decimal::from(10)))
///     .collect();
/// let third = Decimal::from(100) / Decimal::from(3);
///
/// let outcome = reconcile(&members, &[third; 3], 100, RoundingRule::Ceil, 1)?;
///
/// // 34 + 34 + 34 = 102; the first two members give back one unit each.
/// assert_eq!(outcome.share("a"), Some(33));
/// assert_eq!(outcome.share("b"), Some(33));
/// assert_eq!(outcome.share("c"), Some(34));
/// # Ok::<(), split_engine::error::EngineError>(())
/// ```
pub fn reconcile(
    members: &[Member],
    amounts: &[Decimal],
    total_amount: i64,
    rounding_rule: RoundingRule,
    step_number: u32,
) -> EngineResult<SplitOutcome> {
    if members.len() != amounts.len() {
        return Err(EngineError::CalculationError {
            message: format!(
                "{} amounts for {} members",
                amounts.len(),
                members.len()
            ),
        });
    }

    let mut rounded = Vec::with_capacity(amounts.len());
    let mut remainders = Vec::with_capacity(amounts.len());
    for (member, amount) in members.iter().zip(amounts) {
        let whole = rounding_rule.apply(*amount);
        let units = whole.to_i64().ok_or_else(|| EngineError::CalculationError {
            message: format!("share for '{}' is out of range: {}", member.id, amount),
        })?;
        rounded.push(units);
        remainders.push(*amount - whole);
    }

    let total_rounded: i64 = rounded.iter().sum();
    let difference = total_amount - total_rounded;

    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by(|&a, &b| remainders[a].cmp(&remainders[b]));

    let mut adjusted = rounded.clone();
    let adjustment = difference.signum();
    let mut adjusted_members = Vec::new();
    for &index in order.iter().take(difference.unsigned_abs() as usize) {
        adjusted[index] += adjustment;
        adjusted_members.push(members[index].id.clone());
    }

    let final_total: i64 = adjusted.iter().sum();
    if final_total != total_amount {
        warn!(
            total_amount,
            final_total,
            difference,
            member_count = members.len(),
            "Reconciled shares do not match the bill total"
        );
        return Err(EngineError::VerificationFailed {
            expected: total_amount,
            actual: final_total,
        });
    }

    debug!(
        total_amount,
        total_rounded,
        difference,
        rounding_rule = %rounding_rule,
        "Reconciled rounded shares"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "remainder_reconciliation".to_string(),
        rule_name: "Remainder Reconciliation".to_string(),
        input: serde_json::json!({
            "total_amount": total_amount,
            "rounding_rule": rounding_rule.to_string(),
            "rounded_total": total_rounded,
        }),
        output: serde_json::json!({
            "difference": difference,
            "adjusted_members": adjusted_members,
            "final_total": final_total,
        }),
        reasoning: describe_adjustment(rounding_rule, total_rounded, difference, &adjusted_members),
    };

    Ok(SplitOutcome {
        split_amounts: members
            .iter()
            .zip(&adjusted)
            .map(|(m, share)| (m.id.clone(), *share))
            .collect(),
        original_amounts: members
            .iter()
            .zip(amounts)
            .map(|(m, amount)| (m.id.clone(), *amount))
            .collect::<BTreeMap<_, _>>(),
        rounding_rule,
        total_amount,
        audit_trace: vec![audit_step],
    })
}

fn describe_adjustment(
    rounding_rule: RoundingRule,
    total_rounded: i64,
    difference: i64,
    adjusted_members: &[String],
) -> String {
    match difference.signum() {
        0 => format!("{} rounding sums to {} - no adjustment needed", rounding_rule, total_rounded),
        1 => format!(
            "{} rounding sums to {} - added 1 to {}",
            rounding_rule,
            total_rounded,
            adjusted_members.join(", ")
        ),
        _ => format!(
            "{} rounding sums to {} - subtracted 1 from {}",
            rounding_rule,
            total_rounded,
            adjusted_members.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn members(ids: &[&str]) -> Vec<Member> {
        ids.iter().map(|id| Member::new(*id, Decimal::ONE)).collect()
    }

    fn shares(outcome: &SplitOutcome, ids: &[&str]) -> Vec<i64> {
        ids.iter().map(|id| outcome.split_amounts[*id]).collect()
    }

    #[test]
    fn test_exact_amounts_need_no_adjustment() {
        let members = members(&["a", "b", "c"]);
        let outcome = reconcile(
            &members,
            &[dec("50"), dec("30"), dec("20")],
            100,
            RoundingRule::Ceil,
            2,
        )
        .unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![50, 30, 20]);
        assert_eq!(outcome.audit_trace[0].output["difference"], 0);
        assert!(outcome.audit_trace[0].reasoning.contains("no adjustment"));
        assert_eq!(outcome.audit_trace[0].step_number, 2);
    }

    #[test]
    fn test_ceil_overshoot_removes_units_in_member_order_on_ties() {
        let members = members(&["a", "b", "c"]);
        let third = Decimal::from(100) / Decimal::from(3);

        let outcome = reconcile(&members, &[third; 3], 100, RoundingRule::Ceil, 1).unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![33, 33, 34]);
        assert_eq!(outcome.split_total(), 100);
        assert_eq!(outcome.original_amounts["a"], third);
    }

    #[test]
    fn test_floor_shortfall_adds_units_in_member_order_on_ties() {
        let members = members(&["a", "b", "c"]);
        let third = Decimal::from(100) / Decimal::from(3);

        let outcome = reconcile(&members, &[third; 3], 100, RoundingRule::Floor, 1).unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![34, 33, 33]);
    }

    #[test]
    fn test_most_negative_remainders_are_adjusted_first() {
        // ceil: 51, 31, 20 = 102; remainders -0.6, -0.7, -0.7
        let members = members(&["a", "b", "c"]);
        let outcome = reconcile(
            &members,
            &[dec("50.4"), dec("30.3"), dec("19.3")],
            100,
            RoundingRule::Ceil,
            1,
        )
        .unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![51, 30, 19]);
        assert_eq!(
            outcome.audit_trace[0].output["adjusted_members"],
            serde_json::json!(["b", "c"])
        );
    }

    #[test]
    fn test_floor_adds_to_smallest_remainder_first() {
        // floor: 50, 30, 19 = 99; remainders 0.4, 0.3, 0.3
        let members = members(&["a", "b", "c"]);
        let outcome = reconcile(
            &members,
            &[dec("50.4"), dec("30.3"), dec("19.3")],
            100,
            RoundingRule::Floor,
            1,
        )
        .unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![50, 31, 19]);
    }

    #[test]
    fn test_round_rule_reconciles() {
        // round: 17, 17, 17 = 51; remainders all -0.5
        let members = members(&["a", "b", "c"]);
        let outcome = reconcile(
            &members,
            &[dec("16.5"), dec("16.5"), dec("17")],
            50,
            RoundingRule::Round,
            1,
        )
        .unwrap();

        assert_eq!(shares(&outcome, &["a", "b", "c"]), vec![16, 17, 17]);
        assert_eq!(outcome.rounding_rule, RoundingRule::Round);
    }

    #[test]
    fn test_unreachable_total_fails_verification() {
        // floor gives 0 + 0; a difference of 5 cannot be spread over 2 members
        let members = members(&["a", "b"]);
        let result = reconcile(
            &members,
            &[dec("0.5"), dec("0.5")],
            5,
            RoundingRule::Floor,
            1,
        );

        assert_eq!(
            result,
            Err(EngineError::VerificationFailed {
                expected: 5,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let members = members(&["a", "b"]);
        let result = reconcile(&members, &[dec("1")], 1, RoundingRule::Ceil, 1);

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
