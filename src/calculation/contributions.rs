//! Statutory contribution computation.

use rust_decimal::Decimal;

use crate::config::ContributionScheme;

use super::round2;

/// Employee-side and employer-side contribution totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionTotals {
    /// Total withheld from the employee.
    pub employee: Decimal,
    /// Total charged to the employer; never subtracted from net pay.
    pub employer: Decimal,
}

/// Accumulates contributions across the active schemes.
///
/// Each scheme contributes on the full contributory-earnings base, or
/// on the basic pay line alone when its allowances flag is off. The
/// base is capped per-scheme where a cap is configured. Both sides are
/// rounded to 2 decimals after summation, not per scheme.
///
/// # Arguments
///
/// * `full_base` - Sum of contributory earning lines
/// * `basic_base` - The prorated basic pay line amount
/// * `schemes` - The schemes in force for the period
pub fn apply_contributions(
    full_base: Decimal,
    basic_base: Decimal,
    schemes: &[&ContributionScheme],
) -> ContributionTotals {
    let mut employee = Decimal::ZERO;
    let mut employer = Decimal::ZERO;

    for scheme in schemes {
        let mut base = if scheme.include_taxable_allowances {
            full_base
        } else {
            basic_base
        };
        if let Some(cap) = scheme.cap {
            base = base.min(cap);
        }
        employee += base * scheme.ee_rate;
        employer += base * scheme.er_rate;
    }

    ContributionTotals {
        employee: round2(employee),
        employer: round2(employer),
    }
}
