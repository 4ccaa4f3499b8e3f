//! HTTP API module for the payroll computation engine.
//!
//! This module provides the REST endpoints a payroll operator drives
//! the run lifecycle through: create, generate, close, reopen, plus
//! read access to runs and their payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ActorRequest, CreateRunRequest};
pub use response::{ApiError, GenerateResponse};
pub use state::AppState;
