//! Payroll Engine for Philippine statutory payroll
//!
//! This crate computes itemized payslips for every employee of a role group,
//! applying SSS, PhilHealth and Pag-IBIG contributions and the progressive
//! withholding-tax table, and persists each payroll run atomically.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
