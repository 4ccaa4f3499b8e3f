//! Request types for the payroll HTTP API.

use serde::Deserialize;

/// Body of `POST /runs`: the period to create a draft run for.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRunRequest {
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period (1-12).
    pub month: u32,
    /// Optional free-text note attached to the run.
    #[serde(default)]
    pub note: String,
}

/// Body of the run lifecycle actions: who is acting.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorRequest {
    /// The account performing the action; receives the outcome
    /// notification.
    pub actor_id: String,
}
