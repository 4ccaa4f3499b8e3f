//! Data access seam for the payroll engine.
//!
//! The engine reads employee, compensation and situation data and
//! persists runs and payslips through the [`PayrollStore`] trait, so
//! computation is deterministic and unit-testable without a live
//! database. [`MemoryStore`] is the in-process implementation used by
//! tests and the demo HTTP surface; a deployment backs the trait with
//! its own persistence.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Contract, Employee, PayrollRun, Payslip, RecurringComponentAssignment, Situation,
    VariableInput,
};

/// Read and write access to payroll data for one company policy.
///
/// Read methods return owned snapshots; the engine computes an entire
/// run against them before writing anything back, which gives the
/// all-or-nothing behavior run generation requires.
pub trait PayrollStore {
    /// Returns every employee in the directory.
    fn employees(&self) -> Vec<Employee>;

    /// Looks up one employee by id.
    fn employee(&self, id: &str) -> Option<Employee>;

    /// Returns an employee's contracts, all statuses included.
    fn contracts_for(&self, employee_id: &str) -> Vec<Contract>;

    /// Returns an employee's recurring component assignments.
    fn recurring_for(&self, employee_id: &str) -> Vec<RecurringComponentAssignment>;

    /// Returns an employee's variable inputs, linked and unlinked.
    fn variable_inputs_for(&self, employee_id: &str) -> Vec<VariableInput>;

    /// Returns an employee's administrative situations.
    fn situations_for(&self, employee_id: &str) -> Vec<Situation>;

    /// Looks up a run by id.
    fn run(&self, id: Uuid) -> Option<PayrollRun>;

    /// Persists a run's current state.
    fn save_run(&mut self, run: &PayrollRun);

    /// Returns the payslips belonging to a run.
    fn payslips_for_run(&self, run_id: Uuid) -> Vec<Payslip>;

    /// Inserts or replaces the payslip for the slip's (run, employee)
    /// pair, returning the stored payslip's id. An existing row keeps
    /// its id; only one payslip ever exists per pair.
    fn upsert_payslip(&mut self, payslip: Payslip) -> Uuid;

    /// Deletes every payslip belonging to a run.
    fn delete_payslips_for_run(&mut self, run_id: Uuid);
}

/// In-memory [`PayrollStore`] implementation.
///
/// Also provides the mutators tests and the demo API use to seed data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: Vec<Employee>,
    contracts: Vec<Contract>,
    recurring: Vec<RecurringComponentAssignment>,
    variables: Vec<VariableInput>,
    situations: Vec<Situation>,
    runs: HashMap<Uuid, PayrollRun>,
    payslips: Vec<Payslip>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee to the directory.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Adds a contract.
    pub fn add_contract(&mut self, contract: Contract) {
        self.contracts.push(contract);
    }

    /// Adds a recurring component assignment.
    pub fn add_recurring(&mut self, assignment: RecurringComponentAssignment) {
        self.recurring.push(assignment);
    }

    /// Adds a variable input.
    pub fn add_variable_input(&mut self, input: VariableInput) {
        self.variables.push(input);
    }

    /// Adds an administrative situation.
    pub fn add_situation(&mut self, situation: Situation) {
        self.situations.push(situation);
    }

    /// Creates a draft run for the period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` for an impossible month and
    /// `DuplicateRun` when the period already has a run.
    pub fn create_run(&mut self, year: i32, month: u32) -> EngineResult<PayrollRun> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        if self
            .runs
            .values()
            .any(|r| r.year == year && r.month == month)
        {
            return Err(EngineError::DuplicateRun { year, month });
        }
        let run = PayrollRun::new(year, month);
        self.runs.insert(run.id, run.clone());
        Ok(run)
    }
}

impl PayrollStore for MemoryStore {
    fn employees(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    fn employee(&self, id: &str) -> Option<Employee> {
        self.employees.iter().find(|e| e.id == id).cloned()
    }

    fn contracts_for(&self, employee_id: &str) -> Vec<Contract> {
        self.contracts
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn recurring_for(&self, employee_id: &str) -> Vec<RecurringComponentAssignment> {
        self.recurring
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn variable_inputs_for(&self, employee_id: &str) -> Vec<VariableInput> {
        self.variables
            .iter()
            .filter(|v| v.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn situations_for(&self, employee_id: &str) -> Vec<Situation> {
        self.situations
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn run(&self, id: Uuid) -> Option<PayrollRun> {
        self.runs.get(&id).cloned()
    }

    fn save_run(&mut self, run: &PayrollRun) {
        self.runs.insert(run.id, run.clone());
    }

    fn payslips_for_run(&self, run_id: Uuid) -> Vec<Payslip> {
        self.payslips
            .iter()
            .filter(|p| p.run_id == run_id)
            .cloned()
            .collect()
    }

    fn upsert_payslip(&mut self, mut payslip: Payslip) -> Uuid {
        if let Some(existing) = self
            .payslips
            .iter_mut()
            .find(|p| p.run_id == payslip.run_id && p.employee_id == payslip.employee_id)
        {
            payslip.id = existing.id;
            *existing = payslip;
            existing.id
        } else {
            let id = payslip.id;
            self.payslips.push(payslip);
            id
        }
    }

    fn delete_payslips_for_run(&mut self, run_id: Uuid) {
        self.payslips.retain(|p| p.run_id != run_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_payslip(run_id: Uuid, employee_id: &str) -> Payslip {
        Payslip {
            id: Uuid::new_v4(),
            run_id,
            employee_id: employee_id.to_string(),
            base_salary: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
            taxable_gross: Decimal::ZERO,
            employee_contrib: Decimal::ZERO,
            employer_contrib: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            net_pay: Decimal::ZERO,
            currency: "XAF".to_string(),
            finalized: false,
            items: vec![],
        }
    }

    #[test]
    fn test_create_run_rejects_duplicate_period() {
        let mut store = MemoryStore::new();
        store.create_run(2026, 3).unwrap();

        match store.create_run(2026, 3) {
            Err(EngineError::DuplicateRun { year, month }) => {
                assert_eq!(year, 2026);
                assert_eq!(month, 3);
            }
            other => panic!("Expected DuplicateRun, got {:?}", other),
        }
    }

    #[test]
    fn test_create_run_rejects_impossible_month() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.create_run(2026, 0),
            Err(EngineError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            store.create_run(2026, 13),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_different_periods_coexist() {
        let mut store = MemoryStore::new();
        store.create_run(2026, 3).unwrap();
        store.create_run(2026, 4).unwrap();
        store.create_run(2025, 3).unwrap();
    }

    #[test]
    fn test_upsert_payslip_replaces_and_keeps_id() {
        let mut store = MemoryStore::new();
        let run = store.create_run(2026, 3).unwrap();

        let first = sample_payslip(run.id, "emp_001");
        let first_id = store.upsert_payslip(first);

        let mut second = sample_payslip(run.id, "emp_001");
        second.net_pay = Decimal::from(100);
        let second_id = store.upsert_payslip(second);

        assert_eq!(first_id, second_id);
        let slips = store.payslips_for_run(run.id);
        assert_eq!(slips.len(), 1);
        assert_eq!(slips[0].net_pay, Decimal::from(100));
    }

    #[test]
    fn test_upsert_payslip_distinct_employees_coexist() {
        let mut store = MemoryStore::new();
        let run = store.create_run(2026, 3).unwrap();

        store.upsert_payslip(sample_payslip(run.id, "emp_001"));
        store.upsert_payslip(sample_payslip(run.id, "emp_002"));

        assert_eq!(store.payslips_for_run(run.id).len(), 2);
    }

    #[test]
    fn test_delete_payslips_only_touches_the_run() {
        let mut store = MemoryStore::new();
        let run_a = store.create_run(2026, 3).unwrap();
        let run_b = store.create_run(2026, 4).unwrap();

        store.upsert_payslip(sample_payslip(run_a.id, "emp_001"));
        store.upsert_payslip(sample_payslip(run_b.id, "emp_001"));

        store.delete_payslips_for_run(run_a.id);
        assert!(store.payslips_for_run(run_a.id).is_empty());
        assert_eq!(store.payslips_for_run(run_b.id).len(), 1);
    }

    #[test]
    fn test_save_run_overwrites_state() {
        let mut store = MemoryStore::new();
        let mut run = store.create_run(2026, 3).unwrap();

        run.note = "first batch".to_string();
        store.save_run(&run);

        assert_eq!(store.run(run.id).unwrap().note, "first batch");
    }

    #[test]
    fn test_reads_filter_by_employee() {
        let mut store = MemoryStore::new();
        store.add_situation(Situation {
            employee_id: "emp_001".to_string(),
            suspends_payroll: true,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: None,
        });

        assert_eq!(store.situations_for("emp_001").len(), 1);
        assert!(store.situations_for("emp_002").is_empty());
    }
}
