//! Run eligibility gating.
//!
//! Eligibility is evaluated before any monetary computation: an excluded
//! employee produces no payslip for the run.

use crate::models::{Employee, Situation};

use super::PayrollPeriod;

/// Determines whether an employee participates in a run.
///
/// An employee is eligible when flagged active in the directory and no
/// payroll-suspending situation covers the period's reference date
/// (day 15 of the month). With no situation rows supplied the check
/// degrades to the active flag alone.
///
/// # Arguments
///
/// * `employee` - The employee to gate
/// * `situations` - The employee's situation rows, read-only
/// * `period` - The run period
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{is_eligible, PayrollPeriod};
/// use payroll_engine::models::Employee;
///
/// let period = PayrollPeriod::for_month(2026, 3).unwrap();
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     user_id: None,
///     first_name: "Awa".to_string(),
///     last_name: "Ndiaye".to_string(),
///     is_active: true,
///     hire_date: None,
///     termination_date: None,
/// };
/// assert!(is_eligible(&employee, &[], &period));
/// ```
pub fn is_eligible(employee: &Employee, situations: &[Situation], period: &PayrollPeriod) -> bool {
    if !employee.is_active {
        return false;
    }

    let reference = period.reference_date();
    !situations
        .iter()
        .any(|s| s.employee_id == employee.id && s.suspends_payroll && s.covers(reference))
}
