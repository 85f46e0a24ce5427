//! Cost-apportionment engine for shared dormitory bills
//!
//! This crate splits a bill between the members of a dormitory. Each member
//! is weighted by the days they actually stayed during the billing period,
//! after leave has been deducted, and each expense type applies its own
//! weighting strategy. Shares are rounded to whole minor currency units and
//! reconciled so they always sum exactly to the bill total.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
