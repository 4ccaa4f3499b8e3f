//! Payroll run model and lifecycle states.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a payroll run.
///
/// Runs move `Draft -> Processed -> Closed`; an explicit reopen takes a
/// closed run back to `Draft` and discards its payslips. Every other
/// transition is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created but not yet computed, or reopened for recomputation.
    Draft,
    /// Computed; payslips exist and may still be regenerated.
    Processed,
    /// Validated for payment; payslips are immutable.
    Closed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStatus::Draft => "draft",
            RunStatus::Processed => "processed",
            RunStatus::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// One payroll computation cycle for a (year, month) period.
///
/// A run is unique per period within a company policy; the store enforces
/// the constraint at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period (1-12).
    pub month: u32,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// When the run row was created.
    pub generated_at: DateTime<Utc>,
    /// When the run was last computed, if it has been.
    pub processed_at: Option<DateTime<Utc>>,
    /// When the run was closed, if it has been.
    pub closed_at: Option<DateTime<Utc>>,
    /// Free-text note attached by the operator.
    #[serde(default)]
    pub note: String,
}

impl PayrollRun {
    /// Creates a fresh draft run for the given period.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            year,
            month,
            status: RunStatus::Draft,
            generated_at: Utc::now(),
            processed_at: None,
            closed_at: None,
            note: String::new(),
        }
    }

    /// Returns the period as an "MM/YYYY" label used in notifications.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PayrollRun;
    ///
    /// let run = PayrollRun::new(2026, 3);
    /// assert_eq!(run.period_label(), "03/2026");
    /// ```
    pub fn period_label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}
