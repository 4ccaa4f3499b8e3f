//! Calculation logic for the payroll computation engine.
//!
//! This module contains the per-employee calculation functions: period
//! bounds and day counting, run eligibility gating, proration, currency
//! conversion, payslip line aggregation, statutory contributions and
//! progressive income tax.

mod contributions;
mod eligibility;
mod fx;
mod lines;
mod period;
mod proration;
mod tax;

pub use contributions::{apply_contributions, ContributionTotals};
pub use eligibility::is_eligible;
pub use fx::to_settlement_currency;
pub use lines::{
    active_contract, aggregate_lines, build_basic_line, build_recurring_lines,
    build_variable_lines, LineTotals,
};
pub use period::{working_days_between, PayrollPeriod};
pub use proration::prorate;
pub use tax::compute_tax;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount half-up to 2 decimal places.
///
/// The result always carries a scale of 2, so serialized amounts read
/// "450000.00" rather than "450000".
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("2.345").unwrap();
/// assert_eq!(round2(value), Decimal::from_str("2.35").unwrap());
/// ```
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
