//! Compensation input models.
//!
//! Contracts, recurring component assignments and variable inputs are the
//! per-employee financial facts the engine reads for a period. All three
//! are consumed read-only; the compensation store owns their lifecycle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of salary agreement a contract represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Permanent staff.
    Permanent,
    /// Contractual agent.
    Contractual,
    /// Temporary engagement.
    Temporary,
}

/// The lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// The contract is in force.
    Active,
    /// The contract ran to its end date.
    Expired,
    /// The contract was ended early.
    Terminated,
}

/// A salary agreement for one employee.
///
/// An employee may hold several contracts over time. For a given run the
/// engine selects the ACTIVE contract overlapping the period with the
/// most recent start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract row.
    pub id: u64,
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// The kind of agreement.
    pub contract_type: ContractType,
    /// Monthly salary in the contract currency.
    pub salary: Decimal,
    /// Currency of the salary, when it differs from the policy's
    /// settlement currency. `None` means the settlement currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Contract start date.
    pub start_date: NaiveDate,
    /// Contract end date, `None` for ongoing.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: ContractStatus,
}

impl Contract {
    /// Returns true if this contract is ACTIVE and overlaps the
    /// inclusive [`period_start`, `period_end`] window.
    pub fn overlaps(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.status == ContractStatus::Active
            && self.start_date <= period_end
            && self.end_date.is_none_or(|end| end >= period_start)
    }
}

/// A standing compensation line for one employee.
///
/// Contributes a payslip item in every period it is active and overlaps.
/// The amount is either fixed or a percentage of the prorated basic pay,
/// never both; a fixed amount wins when both are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringComponentAssignment {
    /// Unique identifier for the assignment row.
    pub id: u64,
    /// The employee this assignment belongs to.
    pub employee_id: String,
    /// The catalog component the line is booked against.
    pub component_code: String,
    /// Fixed amount per period, in the settlement currency. Zero when
    /// the assignment is percentage-based.
    pub amount: Decimal,
    /// Percentage of the prorated basic pay, as a fraction (0.10 = 10%).
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// First period day the assignment applies from.
    pub start_date: NaiveDate,
    /// Last day the assignment applies, `None` for open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the assignment is switched on at all.
    pub active: bool,
    /// Free-text context for HR.
    #[serde(default)]
    pub note: String,
}

impl RecurringComponentAssignment {
    /// Returns true if the assignment is active and its date window
    /// overlaps the inclusive [`period_start`, `period_end`] window.
    pub fn applies_to(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.active
            && self.start_date <= period_end
            && self.end_date.is_none_or(|end| end >= period_start)
    }
}

/// A one-off compensation line for one employee.
///
/// Typically overtime, bonuses or ad hoc deductions. Rows are either
/// linked to a specific run or, as a capture convenience, left unlinked
/// and picked up by whichever run covers their creation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInput {
    /// Unique identifier for the input row.
    pub id: u64,
    /// The run this input was captured for, if any.
    #[serde(default)]
    pub run_id: Option<Uuid>,
    /// The employee this input belongs to.
    pub employee_id: String,
    /// The catalog component the line is booked against.
    pub component_code: String,
    /// Number of units (hours, days, occurrences).
    pub quantity: Decimal,
    /// Amount per unit.
    pub rate: Decimal,
    /// Explicit total amount. When zero, the engine derives
    /// `quantity * rate` instead.
    pub amount: Decimal,
    /// Free-text context for HR.
    #[serde(default)]
    pub note: String,
    /// The date the row was captured; drives period matching for
    /// unlinked rows.
    pub created_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_contract(status: ContractStatus, end: Option<NaiveDate>) -> Contract {
        Contract {
            id: 1,
            employee_id: "emp_001".to_string(),
            contract_type: ContractType::Permanent,
            salary: dec("900000"),
            currency: None,
            start_date: date(2025, 1, 1),
            end_date: end,
            status,
        }
    }

    #[test]
    fn test_active_open_ended_contract_overlaps_period() {
        let contract = sample_contract(ContractStatus::Active, None);
        assert!(contract.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_contract_ending_before_period_does_not_overlap() {
        let contract = sample_contract(ContractStatus::Active, Some(date(2026, 2, 28)));
        assert!(!contract.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_contract_ending_inside_period_overlaps() {
        let contract = sample_contract(ContractStatus::Active, Some(date(2026, 3, 10)));
        assert!(contract.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_terminated_contract_never_overlaps() {
        let contract = sample_contract(ContractStatus::Terminated, None);
        assert!(!contract.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_contract_starting_after_period_does_not_overlap() {
        let mut contract = sample_contract(ContractStatus::Active, None);
        contract.start_date = date(2026, 4, 1);
        assert!(!contract.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_inactive_assignment_never_applies() {
        let assignment = RecurringComponentAssignment {
            id: 7,
            employee_id: "emp_001".to_string(),
            component_code: "ALW_TRANSPORT".to_string(),
            amount: dec("25000"),
            percentage: None,
            start_date: date(2025, 1, 1),
            end_date: None,
            active: false,
            note: String::new(),
        };
        assert!(!assignment.applies_to(date(2026, 3, 1), date(2026, 3, 31)));
    }

    #[test]
    fn test_assignment_window_overlap() {
        let assignment = RecurringComponentAssignment {
            id: 8,
            employee_id: "emp_001".to_string(),
            component_code: "ALW_HOUSING".to_string(),
            amount: dec("50000"),
            percentage: None,
            start_date: date(2026, 3, 15),
            end_date: Some(date(2026, 5, 31)),
            active: true,
            note: String::new(),
        };
        assert!(assignment.applies_to(date(2026, 3, 1), date(2026, 3, 31)));
        assert!(assignment.applies_to(date(2026, 5, 1), date(2026, 5, 31)));
        assert!(!assignment.applies_to(date(2026, 2, 1), date(2026, 2, 28)));
        assert!(!assignment.applies_to(date(2026, 6, 1), date(2026, 6, 30)));
    }

    #[test]
    fn test_contract_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContractType::Permanent).unwrap(),
            "\"permanent\""
        );
        assert_eq!(
            serde_json::to_string(&ContractStatus::Terminated).unwrap(),
            "\"terminated\""
        );
    }

    #[test]
    fn test_variable_input_deserialization_defaults() {
        let json = r#"{
            "id": 12,
            "employee_id": "emp_001",
            "component_code": "OVERTIME",
            "quantity": "10",
            "rate": "2500",
            "amount": "0",
            "created_on": "2026-03-12"
        }"#;

        let input: VariableInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.run_id, None);
        assert_eq!(input.note, "");
        assert_eq!(input.quantity, dec("10"));
        assert_eq!(input.created_on, date(2026, 3, 12));
    }
}
