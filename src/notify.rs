//! Run lifecycle events and notification dispatch.
//!
//! The engine publishes domain events after a lifecycle transition
//! commits; this module renders them into notifications and hands them
//! to a [`Notifier`]. Delivery is fire-and-forget: a failing notifier
//! is logged and never affects the already-committed payroll state.
//! Actual delivery channels (SMS, email, in-app) live behind the
//! trait, outside this crate.

use std::sync::Mutex;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// The notification category used for every payroll event.
pub const CATEGORY_PAYROLL: &str = "payroll";

/// Relative urgency of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Informational.
    Low,
    /// Default.
    Normal,
    /// Time-sensitive.
    High,
}

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The account to deliver to.
    pub user_id: String,
    /// Short subject line.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// Routing category (always [`CATEGORY_PAYROLL`] here).
    pub category: String,
    /// Delivery urgency.
    pub priority: Priority,
    /// Structured context for the delivery layer.
    pub metadata: serde_json::Value,
}

/// Error returned by a notifier that failed to accept a notification.
#[derive(Debug, Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifyError(pub String);

/// A delivery channel for notifications.
///
/// Implementations are expected to enqueue quickly; the engine calls
/// them synchronously after committing a run transition and drops any
/// error on the floor (logged, not propagated).
pub trait Notifier: Send + Sync {
    /// Accepts a notification for delivery.
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// A notifier that only writes structured logs.
///
/// The default collaborator when no real delivery channel is wired in.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            user_id = %notification.user_id,
            title = %notification.title,
            category = %notification.category,
            "notification dispatched"
        );
        Ok(())
    }
}

/// A notifier that records everything it receives, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every notification received so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .map_err(|_| NotifyError("recorder poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

/// A domain event emitted by a run lifecycle transition.
///
/// Events carry everything needed to render their notification, so the
/// dispatcher never reads payroll state.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A run was (re)computed. Sent to the initiating actor.
    RunGenerated {
        /// The run that was computed.
        run_id: Uuid,
        /// "MM/YYYY" period label.
        period: String,
        /// The company policy name.
        policy: String,
        /// The actor who triggered the computation.
        actor_id: String,
        /// How many payslips were created or refreshed.
        payslip_count: usize,
    },
    /// A payslip is available. Sent to the employee's account.
    PayslipReady {
        /// The run the payslip belongs to.
        run_id: Uuid,
        /// "MM/YYYY" period label.
        period: String,
        /// The employee's account.
        user_id: String,
        /// Net pay on the payslip.
        net_pay: Decimal,
        /// Settlement currency code.
        currency: String,
    },
    /// A run was closed. Sent to the initiating actor.
    RunClosed {
        /// The run that was closed.
        run_id: Uuid,
        /// "MM/YYYY" period label.
        period: String,
        /// The company policy name.
        policy: String,
        /// The actor who closed the run.
        actor_id: String,
    },
    /// A closed run's payment was validated. Sent to each employee.
    PaymentValidated {
        /// The run that was closed.
        run_id: Uuid,
        /// "MM/YYYY" period label.
        period: String,
        /// The employee's account.
        user_id: String,
        /// Net pay on the payslip.
        net_pay: Decimal,
        /// Settlement currency code.
        currency: String,
    },
    /// A run was reopened to draft. Sent to the initiating actor only.
    RunReopened {
        /// The run that was reopened.
        run_id: Uuid,
        /// "MM/YYYY" period label.
        period: String,
        /// The company policy name.
        policy: String,
        /// The actor who reopened the run.
        actor_id: String,
    },
}

impl RunEvent {
    /// Renders the event into its notification.
    pub fn into_notification(self) -> Notification {
        match self {
            RunEvent::RunGenerated {
                run_id,
                period,
                policy,
                actor_id,
                payslip_count,
            } => Notification {
                user_id: actor_id,
                title: format!("Payroll run {}", period),
                message: format!(
                    "Payroll run {} for policy {} generated. {} payslips created or refreshed.",
                    period, policy, payslip_count
                ),
                category: CATEGORY_PAYROLL.to_string(),
                priority: Priority::Normal,
                metadata: json!({
                    "run_id": run_id.to_string(),
                    "period": period,
                    "payslip_count": payslip_count,
                }),
            },
            RunEvent::PayslipReady {
                run_id,
                period,
                user_id,
                net_pay,
                currency,
            } => Notification {
                user_id,
                title: format!("Payslip {}", period),
                message: format!(
                    "Your payslip for {} is available. Net pay: {} {}.",
                    period, net_pay, currency
                ),
                category: CATEGORY_PAYROLL.to_string(),
                priority: Priority::Normal,
                metadata: json!({
                    "run_id": run_id.to_string(),
                    "period": period,
                }),
            },
            RunEvent::RunClosed {
                run_id,
                period,
                policy,
                actor_id,
            } => Notification {
                user_id: actor_id,
                title: format!("Payroll run {} closed", period),
                message: format!(
                    "Payroll run {} for policy {} closed; payments validated.",
                    period, policy
                ),
                category: CATEGORY_PAYROLL.to_string(),
                priority: Priority::Normal,
                metadata: json!({
                    "run_id": run_id.to_string(),
                    "period": period,
                }),
            },
            RunEvent::PaymentValidated {
                run_id,
                period,
                user_id,
                net_pay,
                currency,
            } => Notification {
                user_id,
                title: format!("Payment validated {}", period),
                message: format!(
                    "Payment validated for {}. Net paid: {} {}.",
                    period, net_pay, currency
                ),
                category: CATEGORY_PAYROLL.to_string(),
                priority: Priority::High,
                metadata: json!({
                    "run_id": run_id.to_string(),
                    "period": period,
                }),
            },
            RunEvent::RunReopened {
                run_id,
                period,
                policy,
                actor_id,
            } => Notification {
                user_id: actor_id,
                title: format!("Payroll run {} reopened", period),
                message: format!("Payroll run {} for policy {} reopened.", period, policy),
                category: CATEGORY_PAYROLL.to_string(),
                priority: Priority::Normal,
                metadata: json!({
                    "run_id": run_id.to_string(),
                    "period": period,
                }),
            },
        }
    }
}

/// Renders and delivers an event, swallowing delivery failures.
pub fn dispatch(notifier: &dyn Notifier, event: RunEvent) {
    let notification = event.into_notification();
    if let Err(err) = notifier.notify(notification) {
        warn!(error = %err, "notification dispatch failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_run_generated_targets_the_actor() {
        let notification = RunEvent::RunGenerated {
            run_id: Uuid::nil(),
            period: "03/2026".to_string(),
            policy: "Demo".to_string(),
            actor_id: "hr_001".to_string(),
            payslip_count: 12,
        }
        .into_notification();

        assert_eq!(notification.user_id, "hr_001");
        assert_eq!(notification.category, CATEGORY_PAYROLL);
        assert!(notification.message.contains("12 payslips"));
        assert_eq!(notification.metadata["payslip_count"], 12);
    }

    #[test]
    fn test_payslip_ready_carries_net_pay() {
        let notification = RunEvent::PayslipReady {
            run_id: Uuid::nil(),
            period: "03/2026".to_string(),
            user_id: "user_007".to_string(),
            net_pay: dec("456100.00"),
            currency: "XAF".to_string(),
        }
        .into_notification();

        assert_eq!(notification.user_id, "user_007");
        assert!(notification.message.contains("456100.00 XAF"));
    }

    #[test]
    fn test_payment_validated_is_high_priority() {
        let notification = RunEvent::PaymentValidated {
            run_id: Uuid::nil(),
            period: "03/2026".to_string(),
            user_id: "user_007".to_string(),
            net_pay: dec("456100.00"),
            currency: "XAF".to_string(),
        }
        .into_notification();

        assert_eq!(notification.priority, Priority::High);
    }

    #[test]
    fn test_recording_notifier_captures_dispatches() {
        let recorder = RecordingNotifier::new();
        dispatch(
            &recorder,
            RunEvent::RunReopened {
                run_id: Uuid::nil(),
                period: "03/2026".to_string(),
                policy: "Demo".to_string(),
                actor_id: "hr_001".to_string(),
            },
        );

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user_id, "hr_001");
        assert!(sent[0].title.contains("reopened"));
    }

    #[test]
    fn test_dispatch_swallows_notifier_errors() {
        struct FailingNotifier;
        impl Notifier for FailingNotifier {
            fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
                Err(NotifyError("downstream queue unavailable".to_string()))
            }
        }

        // Must not panic or propagate.
        dispatch(
            &FailingNotifier,
            RunEvent::RunReopened {
                run_id: Uuid::nil(),
                period: "03/2026".to_string(),
                policy: "Demo".to_string(),
                actor_id: "hr_001".to_string(),
            },
        );
    }

    #[test]
    fn test_tracing_notifier_accepts_notifications() {
        let notifier = TracingNotifier;
        let result = notifier.notify(
            RunEvent::RunGenerated {
                run_id: Uuid::nil(),
                period: "03/2026".to_string(),
                policy: "Demo".to_string(),
                actor_id: "hr_001".to_string(),
                payslip_count: 0,
            }
            .into_notification(),
        );
        assert!(result.is_ok());
    }
}
