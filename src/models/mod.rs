//! Core data models for the payroll computation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod employee;
mod payslip;
mod run;
mod situation;

pub use compensation::{
    Contract, ContractStatus, ContractType, RecurringComponentAssignment, VariableInput,
};
pub use employee::Employee;
pub use payslip::{LineSource, Payslip, PayslipItem};
pub use run::{PayrollRun, RunStatus};
pub use situation::Situation;
