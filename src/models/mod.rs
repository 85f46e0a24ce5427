//! Core data models for the split engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_period;
mod expense;
mod leave_record;
mod member;
mod split_result;

pub use billing_period::{BillingPeriod, DateRange, date_range};
pub use expense::{CustomSettings, Expense, ExpenseType, RoundingRule};
pub use leave_record::{LeaveRecord, LeaveType};
pub use member::{Member, OccupancyMap};
pub use split_result::{AuditStep, SplitOutcome, SplitResult};
