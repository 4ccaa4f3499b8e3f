//! Administrative situation model.
//!
//! Situations are a read-only eligibility signal supplied by the
//! situation service: an active suspending situation covering the run's
//! reference date excludes the employee from the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An administrative situation affecting one employee.
///
/// Only the payroll-relevant projection of the situation record: the
/// suspend flag carried by its type, and the date interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// The employee the situation applies to.
    pub employee_id: String,
    /// Whether the situation's type suspends payroll while active.
    pub suspends_payroll: bool,
    /// First day of the situation.
    pub start_date: NaiveDate,
    /// Last day of the situation, `None` while open.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Situation {
    /// Returns true if the situation covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| end >= date)
    }
}
