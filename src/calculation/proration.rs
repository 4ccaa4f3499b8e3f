//! Period proration.
//!
//! Scales an amount by the fraction of the period an employee was
//! active, under the policy's calendar-day or working-day counting.

use rust_decimal::Decimal;

use crate::config::ProrationMethod;
use crate::models::Employee;

use super::period::working_days_between;
use super::{round2, PayrollPeriod};

/// Prorates an amount over the employee's active window in the period.
///
/// The active window is the intersection of the period with
/// [hire date, termination date]; a missing hire date counts from the
/// period start and a missing termination date runs to the period end.
/// An empty or inverted window prorates to zero.
///
/// Under [`ProrationMethod::Calendar`] the fraction is inclusive
/// calendar days over total days in the month; under
/// [`ProrationMethod::Working`] both counts are restricted to Monday
/// through Friday. The result is rounded half-up to 2 decimals.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{prorate, PayrollPeriod};
/// use payroll_engine::config::ProrationMethod;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let period = PayrollPeriod::for_month(2026, 4).unwrap();
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     user_id: None,
///     first_name: "Awa".to_string(),
///     last_name: "Ndiaye".to_string(),
///     is_active: true,
///     hire_date: None,
///     termination_date: None,
/// };
///
/// // Active the whole month: the amount passes through unscaled.
/// let amount = Decimal::from_str("900000").unwrap();
/// let prorated = prorate(amount, &employee, &period, ProrationMethod::Calendar);
/// assert_eq!(prorated, Decimal::from_str("900000.00").unwrap());
/// ```
pub fn prorate(
    amount: Decimal,
    employee: &Employee,
    period: &PayrollPeriod,
    method: ProrationMethod,
) -> Decimal {
    if amount.is_zero() {
        return round2(Decimal::ZERO);
    }

    let hire = employee.hire_date.unwrap_or(period.start);
    let active_start = period.start.max(hire);
    let active_end = match employee.termination_date {
        Some(term) => period.end.min(term),
        None => period.end,
    };
    if active_end < active_start {
        return round2(Decimal::ZERO);
    }

    let (part, total) = match method {
        ProrationMethod::Calendar => {
            let part = (active_end - active_start).num_days() as u32 + 1;
            (part, period.total_days)
        }
        ProrationMethod::Working => (
            working_days_between(active_start, active_end),
            working_days_between(period.start, period.end),
        ),
    };

    if total == 0 {
        return round2(amount);
    }
    round2(amount * Decimal::from(part) / Decimal::from(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(hire: Option<NaiveDate>, term: Option<NaiveDate>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            user_id: None,
            first_name: "Awa".to_string(),
            last_name: "Ndiaye".to_string(),
            is_active: true,
            hire_date: hire,
            termination_date: term,
        }
    }

    #[test]
    fn test_full_month_passes_amount_through() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("900000"),
            &employee(Some(date(2020, 1, 1)), None),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("900000.00"));
    }

    #[test]
    fn test_mid_month_hire_in_thirty_day_month() {
        // Hired on the 16th of a 30-day month: 15 of 30 days.
        let period = PayrollPeriod::for_month(2026, 4).unwrap();
        assert_eq!(period.total_days, 30);
        let result = prorate(
            dec("900000"),
            &employee(Some(date(2026, 4, 16)), None),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("450000.00"));
    }

    #[test]
    fn test_termination_before_period_start_prorates_to_zero() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("900000"),
            &employee(Some(date(2020, 1, 1)), Some(date(2026, 2, 15))),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("0.00"));
    }

    #[test]
    fn test_hire_after_period_end_prorates_to_zero() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("900000"),
            &employee(Some(date(2026, 4, 1)), None),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("0.00"));
    }

    #[test]
    fn test_single_active_day() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("310000"),
            &employee(Some(date(2026, 3, 31)), None),
            &period,
            ProrationMethod::Calendar,
        );
        // 310000 / 31 days
        assert_eq!(result, dec("10000.00"));
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 100 * 1/3 over a 3-day window would not land on cents; use a
        // month: 100 * 20/31 = 64.516... -> 64.52
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("100"),
            &employee(Some(date(2026, 3, 12)), None),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("64.52"));
    }

    #[test]
    fn test_working_day_proration_full_month() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("880000"),
            &employee(None, None),
            &period,
            ProrationMethod::Working,
        );
        assert_eq!(result, dec("880000.00"));
    }

    #[test]
    fn test_working_day_proration_half_of_working_days() {
        // March 2026 has 22 weekdays; 2026-03-16 (Monday) onward leaves 12.
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("880000"),
            &employee(Some(date(2026, 3, 16)), None),
            &period,
            ProrationMethod::Working,
        );
        // 880000 * 12 / 22 = 480000
        assert_eq!(result, dec("480000.00"));
    }

    #[test]
    fn test_working_day_proration_weekend_only_window_is_zero() {
        // Hired Saturday, terminated Sunday: no weekdays in the window.
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            dec("880000"),
            &employee(Some(date(2026, 3, 7)), Some(date(2026, 3, 8))),
            &period,
            ProrationMethod::Working,
        );
        assert_eq!(result, dec("0.00"));
    }

    #[test]
    fn test_zero_amount_short_circuits() {
        let period = PayrollPeriod::for_month(2026, 3).unwrap();
        let result = prorate(
            Decimal::ZERO,
            &employee(None, None),
            &period,
            ProrationMethod::Calendar,
        );
        assert_eq!(result, dec("0.00"));
    }

    proptest! {
        /// The prorated amount never exceeds the input amount and never
        /// goes negative, for any hire day within the month.
        #[test]
        fn prop_prorated_amount_is_bounded(hire_day in 1u32..=31, amount in 1u64..10_000_000u64) {
            let period = PayrollPeriod::for_month(2026, 3).unwrap();
            let hire = date(2026, 3, hire_day.min(period.total_days));
            let amount = Decimal::from(amount);
            let result = prorate(
                amount,
                &employee(Some(hire), None),
                &period,
                ProrationMethod::Calendar,
            );
            prop_assert!(result >= Decimal::ZERO);
            prop_assert!(result <= amount);
        }
    }
}
