//! Payroll period bounds and day counting.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// The calendar month a payroll run covers.
///
/// Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollPeriod {
    /// First calendar day of the month.
    pub start: NaiveDate,
    /// Last calendar day of the month.
    pub end: NaiveDate,
    /// Number of calendar days in the month.
    pub total_days: u32,
}

impl PayrollPeriod {
    /// Builds the period for a (year, month) pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` when the pair does not describe a real
    /// calendar month (e.g., month 13).
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::PayrollPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayrollPeriod::for_month(2026, 2).unwrap();
    /// assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    /// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    /// assert_eq!(period.total_days, 28);
    /// ```
    pub fn for_month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidPeriod { year, month })?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(EngineError::InvalidPeriod { year, month })?;
        let end = next_month
            .pred_opt()
            .ok_or(EngineError::InvalidPeriod { year, month })?;
        let total_days = end.day();

        Ok(Self {
            start,
            end,
            total_days,
        })
    }

    /// Returns true if the date falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the eligibility reference date: day 15, or the last day
    /// of the month when the month is shorter.
    pub fn reference_date(&self) -> NaiveDate {
        let day = 15.min(self.total_days);
        // The first of the month always exists, so this cannot fail for
        // a constructed period.
        NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), day)
            .unwrap_or(self.end)
    }
}

/// Counts Monday through Friday days in the inclusive [start, end] range.
///
/// Returns zero for an inverted range.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut day = start;
    let mut count = 0;
    while day <= end {
        if day.weekday().num_days_from_monday() < 5 {
            count += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}
