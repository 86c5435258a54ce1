//! Calculation logic for the Payroll Engine.
//!
//! Each pay rule lives in its own module and returns its figures together
//! with an [`AuditStep`](crate::models::AuditStep): rate derivation, overtime,
//! gross pay, the three statutory contributions (SSS, PhilHealth, Pag-IBIG),
//! withholding tax, and the pluggable Sunday/holiday/lateness components.
//! [`calculate_payslip`] runs them in order for one employee.

mod components;
mod gross_pay;
mod money;
mod overtime;
mod pagibig;
mod payslip;
mod philhealth;
mod rate_derivation;
mod sss;
mod withholding_tax;

pub use components::{
    ComponentAmount, HOLIDAY_REF, LATENESS_REF, PayComponentRule, PayComponentRules, PayContext,
    ReservedComponent, SUNDAY_SPECIAL_REF,
};
pub use gross_pay::{GROSS_PAY_REF, GrossComponents, GrossPayResult, calculate_gross_pay};
pub use money::round_money;
pub use overtime::{OVERTIME_REF, OvertimeResult, calculate_overtime};
pub use pagibig::{PAGIBIG_REF, PagIbigResult, calculate_pagibig_contribution};
pub use payslip::{NET_PAY_REF, PayslipCalculation, calculate_payslip};
pub use philhealth::{PHILHEALTH_REF, PhilHealthResult, calculate_philhealth_contribution};
pub use rate_derivation::{RATE_DERIVATION_REF, RateDerivation, derive_rates};
pub use sss::{SSS_REF, SssResult, calculate_sss_contribution};
pub use withholding_tax::{WITHHOLDING_TAX_REF, WithholdingTaxResult, calculate_withholding_tax};
