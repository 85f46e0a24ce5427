//! Calculation logic for the split engine.
//!
//! This module contains the leave-day and stay-day adjustments, occupancy
//! aggregation, the per-expense-type weighting strategies, remainder
//! reconciliation and the split orchestrator that ties them together.

mod air_conditioner;
mod custom;
mod host;
mod internet;
mod leave_days;
mod lighting;
mod metered;
mod occupancy;
mod reconcile;
mod split;
mod stay_days;
mod weighting;

pub use air_conditioner::split_air_conditioner;
pub use custom::{CustomRule, split_custom};
pub use host::split_host;
pub use internet::split_internet;
pub use leave_days::calculate_leave_days;
pub use lighting::split_by_stay_days;
pub use metered::{split_electricity, split_water};
pub use occupancy::aggregate_stay_days;
pub use reconcile::reconcile;
pub use split::{calculate_by_stay_days, calculate_expense, calculate_with_registry};
pub use stay_days::{DEFAULT_STAY_FRACTION, update_stay_days_by_leave_records};
pub use weighting::{
    BUILTIN_STRATEGIES, StrategyRegistry, Weighting, WeightingInput, WeightingStrategy,
};
