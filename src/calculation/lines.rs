//! Payslip line aggregation.
//!
//! Builds the set of payslip items for one employee within one run:
//! the prorated basic pay line, recurring component lines and variable
//! input lines, each tagged with its provenance.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{ComponentKind, PayrollConfig};
use crate::error::EngineResult;
use crate::models::{
    Contract, Employee, LineSource, PayslipItem, RecurringComponentAssignment, VariableInput,
};

use super::fx::to_settlement_currency;
use super::proration::prorate;
use super::{round2, PayrollPeriod};

/// Selects the contract the basic pay line is derived from.
///
/// Picks the ACTIVE contract overlapping the period with the most
/// recent start date, ties broken by the higher row id.
pub fn active_contract<'a>(
    contracts: &'a [Contract],
    period: &PayrollPeriod,
) -> Option<&'a Contract> {
    contracts
        .iter()
        .filter(|c| c.overlaps(period.start, period.end))
        .max_by_key(|c| (c.start_date, c.id))
}

/// Builds the basic pay line from a contract.
///
/// The contract salary is converted to the settlement currency, then
/// prorated over the employee's active window. Returns the item and the
/// prorated amount, which later feeds percentage-based recurring lines
/// and the payslip's base salary field. The basic line is always
/// emitted, even when proration reduces it to zero.
pub fn build_basic_line(
    employee: &Employee,
    contract: &Contract,
    config: &PayrollConfig,
    period: &PayrollPeriod,
) -> EngineResult<(PayslipItem, Decimal)> {
    let component = config.basic_component()?;
    let in_settlement = to_settlement_currency(
        contract.salary,
        contract.currency.as_deref(),
        config,
        period.end,
    )?;
    let prorated = prorate(
        in_settlement,
        employee,
        period,
        config.policy().proration_method,
    );

    let item = PayslipItem {
        component_code: component.code.clone(),
        quantity: Decimal::ONE,
        rate: prorated,
        amount: prorated,
        source: LineSource::Basic {
            contract_id: contract.id,
        },
    };
    Ok((item, prorated))
}

/// Builds the recurring component lines active in the period.
///
/// A fixed amount wins over a percentage; percentage lines are computed
/// against the prorated basic pay. Zero-amount results are skipped.
/// Lines come out ordered by (component sequence, assignment id).
pub fn build_recurring_lines(
    assignments: &[RecurringComponentAssignment],
    base_for_pct: Decimal,
    config: &PayrollConfig,
    period: &PayrollPeriod,
) -> EngineResult<Vec<PayslipItem>> {
    let mut rows: Vec<(u32, u64, PayslipItem)> = Vec::new();

    for assignment in assignments {
        if !assignment.applies_to(period.start, period.end) {
            continue;
        }
        let component = config.component(&assignment.component_code)?;

        let mut amount = assignment.amount;
        if amount.is_zero() {
            if let Some(pct) = assignment.percentage {
                amount = base_for_pct * pct;
            }
        }
        let amount = round2(amount);
        if amount.is_zero() {
            continue;
        }

        rows.push((
            component.sequence,
            assignment.id,
            PayslipItem {
                component_code: component.code.clone(),
                quantity: Decimal::ONE,
                rate: amount,
                amount,
                source: LineSource::Recurring {
                    assignment_id: assignment.id,
                },
            },
        ));
    }

    rows.sort_by_key(|(sequence, id, _)| (*sequence, *id));
    Ok(rows.into_iter().map(|(_, _, item)| item).collect())
}

/// Builds the variable input lines for a run.
///
/// Rows explicitly linked to the run are taken as-is; as a capture
/// convenience, unlinked rows created during the period are taken too.
/// An explicit amount wins; otherwise the amount is quantity times
/// rate. Zero-amount results are skipped. Lines come out ordered by
/// (component sequence, input id).
pub fn build_variable_lines(
    inputs: &[VariableInput],
    run_id: Uuid,
    config: &PayrollConfig,
    period: &PayrollPeriod,
) -> EngineResult<Vec<PayslipItem>> {
    let mut rows: Vec<(u32, u64, PayslipItem)> = Vec::new();

    for input in inputs {
        let matches_run = input.run_id == Some(run_id)
            || (input.run_id.is_none() && period.contains(input.created_on));
        if !matches_run {
            continue;
        }
        let component = config.component(&input.component_code)?;

        let mut amount = input.amount;
        if amount.is_zero() {
            amount = input.quantity * input.rate;
        }
        let amount = round2(amount);
        if amount.is_zero() {
            continue;
        }

        let quantity = if input.quantity.is_zero() {
            Decimal::ONE
        } else {
            input.quantity
        };
        let rate = if input.rate.is_zero() {
            amount
        } else {
            round2(input.rate)
        };

        rows.push((
            component.sequence,
            input.id,
            PayslipItem {
                component_code: component.code.clone(),
                quantity,
                rate,
                amount,
                source: LineSource::Variable { input_id: input.id },
            },
        ));
    }

    rows.sort_by_key(|(sequence, id, _)| (*sequence, *id));
    Ok(rows.into_iter().map(|(_, _, item)| item).collect())
}

/// Aggregated sums over a payslip's line items, split by the component
/// flags that drive tax and contribution computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTotals {
    /// Sum of all earning lines.
    pub gross_earnings: Decimal,
    /// Sum of earning lines flagged taxable.
    pub taxable_gross: Decimal,
    /// Sum of earning lines flagged contributory.
    pub contribution_base: Decimal,
    /// Sum of deduction lines flagged pre-tax.
    pub pre_tax_deductions: Decimal,
    /// Sum of deduction lines not flagged pre-tax.
    pub post_tax_deductions: Decimal,
    /// Sum of employer-charge lines; never touches net pay.
    pub employer_charges: Decimal,
}

/// Sums line items into the buckets tax and contribution computation
/// feed from, consulting the component catalog for each line's flags.
pub fn aggregate_lines(items: &[PayslipItem], config: &PayrollConfig) -> EngineResult<LineTotals> {
    let mut totals = LineTotals {
        gross_earnings: Decimal::ZERO,
        taxable_gross: Decimal::ZERO,
        contribution_base: Decimal::ZERO,
        pre_tax_deductions: Decimal::ZERO,
        post_tax_deductions: Decimal::ZERO,
        employer_charges: Decimal::ZERO,
    };

    for item in items {
        let component = config.component(&item.component_code)?;
        match component.kind {
            ComponentKind::Earning => {
                totals.gross_earnings += item.amount;
                if component.taxable {
                    totals.taxable_gross += item.amount;
                }
                if component.contributory {
                    totals.contribution_base += item.amount;
                }
            }
            ComponentKind::Deduction => {
                if component.pre_tax {
                    totals.pre_tax_deductions += item.amount;
                } else {
                    totals.post_tax_deductions += item.amount;
                }
            }
            ComponentKind::Employer => {
                totals.employer_charges += item.amount;
            }
        }
    }
    Ok(totals)
}
