//! Employee model.
//!
//! This module defines the read-only view of an employee that the payroll
//! engine consumes from the employee directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee subject to payroll computation.
///
/// The engine treats employee records as read-only inputs: identity,
/// the active flag and the hire/termination window are everything the
/// computation needs. Directory concerns such as departments, grades and
/// manager links stay with the employee service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The account to notify when a payslip is ready, if the employee
    /// has one. Employees without an account are silently skipped by
    /// the notification dispatcher.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// Whether the employee is active in the directory. Inactive
    /// employees never participate in a run.
    pub is_active: bool,
    /// The date the employee was hired, if recorded. Absent dates are
    /// treated as employment since before the period under computation.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// The date employment ended, if it has.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl Employee {
    /// Returns the employee's display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     user_id: None,
    ///     first_name: "Awa".to_string(),
    ///     last_name: "Ndiaye".to_string(),
    ///     is_active: true,
    ///     hire_date: None,
    ///     termination_date: None,
    /// };
    /// assert_eq!(employee.full_name(), "Awa Ndiaye");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
