//! Run orchestration and lifecycle.
//!
//! [`PayrollEngine`] ties the calculation functions together: it gates
//! eligibility, computes one payslip per participating employee,
//! persists the results through a [`PayrollStore`], drives the run
//! state machine and publishes lifecycle events.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::{
    active_contract, aggregate_lines, apply_contributions, build_basic_line,
    build_recurring_lines, build_variable_lines, compute_tax, is_eligible, round2, PayrollPeriod,
};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRun, Payslip, RunStatus};
use crate::notify::{dispatch, Notifier, RunEvent};
use crate::store::PayrollStore;

/// The payroll run computation engine.
///
/// Holds the reference data and the notification channel; every
/// lifecycle operation takes the store explicitly, so one engine can
/// serve any number of invocations.
pub struct PayrollEngine<'a> {
    config: &'a PayrollConfig,
    notifier: &'a dyn Notifier,
}

impl<'a> PayrollEngine<'a> {
    /// Creates an engine over the given reference data and notifier.
    pub fn new(config: &'a PayrollConfig, notifier: &'a dyn Notifier) -> Self {
        Self { config, notifier }
    }

    /// (Re)computes a run: one payslip per eligible employee.
    ///
    /// Allowed from `Draft` or `Processed`; recomputation overwrites
    /// the prior payslips for the same (run, employee) pairs rather
    /// than appending duplicates. Every payslip is computed in memory
    /// before anything is persisted, so a failure partway leaves the
    /// store exactly as it was.
    ///
    /// On success the run moves to `Processed`, the actor is notified
    /// of the batch and each employee with an account is notified that
    /// their payslip is ready. Returns the persisted payslip ids.
    ///
    /// # Errors
    ///
    /// - `RunNotFound` for an unknown run id
    /// - `InvalidRunState` when the run is `Closed`
    /// - any per-employee computation error, which aborts the whole run
    pub fn generate(
        &self,
        store: &mut dyn PayrollStore,
        run_id: Uuid,
        actor_id: &str,
    ) -> EngineResult<Vec<Uuid>> {
        let mut run = store
            .run(run_id)
            .ok_or(EngineError::RunNotFound { id: run_id })?;
        if run.status == RunStatus::Closed {
            return Err(EngineError::InvalidRunState {
                action: "generate",
                status: run.status,
            });
        }
        let period = PayrollPeriod::for_month(run.year, run.month)?;

        // Compute the whole batch before touching the store: a failure
        // for one employee must not leave the run half-updated.
        let mut computed: Vec<(Payslip, Option<String>)> = Vec::new();
        for employee in store.employees() {
            if let Some(payslip) = self.compute_for_employee(&*store, &run, &period, &employee)? {
                computed.push((payslip, employee.user_id.clone()));
            }
        }

        let mut payslip_ids = Vec::with_capacity(computed.len());
        let mut ready_events = Vec::new();
        for (payslip, user_id) in computed {
            if let Some(user_id) = user_id {
                ready_events.push(RunEvent::PayslipReady {
                    run_id: run.id,
                    period: run.period_label(),
                    user_id,
                    net_pay: payslip.net_pay,
                    currency: payslip.currency.clone(),
                });
            }
            payslip_ids.push(store.upsert_payslip(payslip));
        }

        run.status = RunStatus::Processed;
        run.processed_at = Some(Utc::now());
        store.save_run(&run);

        info!(
            run_id = %run.id,
            period = %run.period_label(),
            payslips = payslip_ids.len(),
            "payroll run generated"
        );

        dispatch(
            self.notifier,
            RunEvent::RunGenerated {
                run_id: run.id,
                period: run.period_label(),
                policy: self.config.policy().name.clone(),
                actor_id: actor_id.to_string(),
                payslip_count: payslip_ids.len(),
            },
        );
        for event in ready_events {
            dispatch(self.notifier, event);
        }

        Ok(payslip_ids)
    }

    /// Closes a processed run, validating its payments.
    ///
    /// Allowed only from `Processed`. Stamps `closed_at`, notifies the
    /// actor and every payslip-holding employee, and returns the
    /// updated run.
    pub fn close(
        &self,
        store: &mut dyn PayrollStore,
        run_id: Uuid,
        actor_id: &str,
    ) -> EngineResult<PayrollRun> {
        let mut run = store
            .run(run_id)
            .ok_or(EngineError::RunNotFound { id: run_id })?;
        if run.status != RunStatus::Processed {
            return Err(EngineError::InvalidRunState {
                action: "close",
                status: run.status,
            });
        }

        run.status = RunStatus::Closed;
        run.closed_at = Some(Utc::now());
        store.save_run(&run);

        info!(run_id = %run.id, period = %run.period_label(), "payroll run closed");

        dispatch(
            self.notifier,
            RunEvent::RunClosed {
                run_id: run.id,
                period: run.period_label(),
                policy: self.config.policy().name.clone(),
                actor_id: actor_id.to_string(),
            },
        );
        for payslip in store.payslips_for_run(run.id) {
            let Some(user_id) = store
                .employee(&payslip.employee_id)
                .and_then(|e| e.user_id)
            else {
                continue;
            };
            dispatch(
                self.notifier,
                RunEvent::PaymentValidated {
                    run_id: run.id,
                    period: run.period_label(),
                    user_id,
                    net_pay: payslip.net_pay,
                    currency: payslip.currency.clone(),
                },
            );
        }

        Ok(run)
    }

    /// Reopens a closed run back to draft.
    ///
    /// Allowed only from `Closed`. Clears the lifecycle timestamps and
    /// deletes every payslip of the run, forcing a full recomputation.
    /// Notifies the reopening actor only.
    pub fn reopen(
        &self,
        store: &mut dyn PayrollStore,
        run_id: Uuid,
        actor_id: &str,
    ) -> EngineResult<PayrollRun> {
        let mut run = store
            .run(run_id)
            .ok_or(EngineError::RunNotFound { id: run_id })?;
        if run.status != RunStatus::Closed {
            return Err(EngineError::InvalidRunState {
                action: "reopen",
                status: run.status,
            });
        }

        run.status = RunStatus::Draft;
        run.processed_at = None;
        run.closed_at = None;
        store.save_run(&run);
        store.delete_payslips_for_run(run.id);

        info!(run_id = %run.id, period = %run.period_label(), "payroll run reopened");

        dispatch(
            self.notifier,
            RunEvent::RunReopened {
                run_id: run.id,
                period: run.period_label(),
                policy: self.config.policy().name.clone(),
                actor_id: actor_id.to_string(),
            },
        );

        Ok(run)
    }

    /// Computes one employee's payslip, or `None` when the employee
    /// does not participate (ineligible, or no contract covers the
    /// period).
    fn compute_for_employee(
        &self,
        store: &dyn PayrollStore,
        run: &PayrollRun,
        period: &PayrollPeriod,
        employee: &Employee,
    ) -> EngineResult<Option<Payslip>> {
        let situations = store.situations_for(&employee.id);
        if !is_eligible(employee, &situations, period) {
            return Ok(None);
        }

        let contracts = store.contracts_for(&employee.id);
        let Some(contract) = active_contract(&contracts, period) else {
            return Ok(None);
        };

        let (basic_item, base_prorated) =
            build_basic_line(employee, contract, self.config, period)?;

        let mut items = vec![basic_item];
        items.extend(build_recurring_lines(
            &store.recurring_for(&employee.id),
            base_prorated,
            self.config,
            period,
        )?);
        items.extend(build_variable_lines(
            &store.variable_inputs_for(&employee.id),
            run.id,
            self.config,
            period,
        )?);

        let totals = aggregate_lines(&items, self.config)?;
        let schemes = self.config.active_schemes(period.end);
        let contribs =
            apply_contributions(totals.contribution_base, base_prorated, &schemes);

        let pit_base = (totals.taxable_gross - contribs.employee - totals.pre_tax_deductions)
            .max(Decimal::ZERO);
        let income_tax = compute_tax(pit_base, self.config.active_tax_table(period.end));

        let other_deductions = round2(totals.pre_tax_deductions + totals.post_tax_deductions);
        let net_pay = round2(
            totals.gross_earnings - contribs.employee - income_tax - other_deductions,
        );

        Ok(Some(Payslip {
            id: Uuid::new_v4(),
            run_id: run.id,
            employee_id: employee.id.clone(),
            base_salary: base_prorated,
            gross_pay: round2(totals.gross_earnings),
            taxable_gross: round2(totals.taxable_gross),
            employee_contrib: contribs.employee,
            employer_contrib: contribs.employer,
            income_tax,
            other_deductions,
            net_pay,
            currency: self.config.settlement_currency().to_string(),
            finalized: false,
            items,
        }))
    }
}
