//! Progressive income tax computation.

use rust_decimal::Decimal;

use crate::config::TaxTable;

use super::round2;

/// Computes progressive income tax over a bracket table.
///
/// Walks the table's slabs in ascending `lower` order, taxing the part
/// of the base that falls inside each slab at that slab's rate, and
/// stops once the base is fully covered or the final unbounded slab is
/// consumed. No table means no tax. Only the final figure is rounded.
///
/// The base is clamped at zero: heavy pre-tax deductions can push it
/// negative.
///
/// # Arguments
///
/// * `pit_base` - Taxable gross minus employee contributions and
///   pre-tax deductions
/// * `table` - The tax table in force, if any
pub fn compute_tax(pit_base: Decimal, table: Option<&TaxTable>) -> Decimal {
    let Some(table) = table else {
        return round2(Decimal::ZERO);
    };

    let base = pit_base.max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;

    for bracket in &table.brackets {
        if base <= bracket.lower {
            break;
        }
        let slab_top = bracket.upper.unwrap_or(base);
        let slab = (base.min(slab_top) - bracket.lower).max(Decimal::ZERO);
        tax += slab * bracket.rate;
        match bracket.upper {
            None => break,
            Some(upper) if base <= upper => break,
            Some(_) => {}
        }
    }

    round2(tax)
}
