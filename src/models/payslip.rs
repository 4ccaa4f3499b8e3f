//! Payslip and payslip item models.
//!
//! A payslip is the computed pay result for one employee within one run.
//! Its line items are fully replaced on every recompute; they are not an
//! append-only history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance of a payslip line item.
///
/// Every line records which kind of input produced it and the id of the
/// originating record, so a computed amount can always be traced back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LineSource {
    /// The prorated basic pay line derived from a contract.
    Basic {
        /// The contract the salary came from.
        contract_id: u64,
    },
    /// A standing allowance or deduction.
    Recurring {
        /// The originating assignment row.
        assignment_id: u64,
    },
    /// A one-off input captured for the period.
    Variable {
        /// The originating input row.
        input_id: u64,
    },
}

/// A single line on a payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipItem {
    /// Catalog code of the component this line is booked against.
    pub component_code: String,
    /// Number of units (1 for flat amounts).
    pub quantity: Decimal,
    /// Amount per unit, in the settlement currency.
    pub rate: Decimal,
    /// Total line amount, in the settlement currency.
    pub amount: Decimal,
    /// Where the line came from.
    pub source: LineSource,
}

/// The computed pay result for one employee within one run.
///
/// Unique per (run, employee); recomputing a run overwrites the existing
/// payslip in place rather than appending a second one. Once the run is
/// closed the payslip is immutable apart from the `finalized` flag set by
/// downstream disbursement reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The run this payslip belongs to.
    pub run_id: Uuid,
    /// The employee this payslip is for.
    pub employee_id: String,
    /// Prorated basic salary in the settlement currency.
    pub base_salary: Decimal,
    /// Sum of all earning lines.
    pub gross_pay: Decimal,
    /// Sum of earning lines flagged taxable.
    pub taxable_gross: Decimal,
    /// Total employee-side statutory contributions.
    pub employee_contrib: Decimal,
    /// Total employer-side statutory contributions; recorded but never
    /// subtracted from net pay.
    pub employer_contrib: Decimal,
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// Sum of pre-tax and post-tax deduction lines.
    pub other_deductions: Decimal,
    /// `gross_pay - employee_contrib - income_tax - other_deductions`.
    pub net_pay: Decimal,
    /// Settlement currency code.
    pub currency: String,
    /// Set by disbursement reconciliation once the payment is settled.
    pub finalized: bool,
    /// Line items, ordered by component display sequence.
    pub items: Vec<PayslipItem>,
}
