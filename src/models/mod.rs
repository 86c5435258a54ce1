//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod holiday;
mod payroll_input;
mod payroll_record;
mod payslip;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Employee, RoleGroup};
pub use holiday::{Holiday, HolidayType, MAX_HOLIDAY_NAME_LEN, NewHoliday};
pub use payroll_input::{PayrollInput, max_amount, max_hours, max_rate};
pub use payroll_record::{
    NewPayrollRecord, PayrollRecord, PayrollRecordId, PayrollStats, PayrollStatus,
};
pub use payslip::Payslip;
