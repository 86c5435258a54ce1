//! Payroll run input.
//!
//! A [`PayrollInput`] carries the parameters of one generation run. The base
//! salary and every optional figure apply uniformly to all employees of the
//! selected role group.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RoleGroup;

/// Largest money value a payroll column can hold (15 digits, 2 decimals).
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, 2)
}

/// Largest hour value a payroll column can hold (8 digits, 2 decimals).
pub fn max_hours() -> Decimal {
    Decimal::new(99_999_999, 2)
}

/// Largest value the narrow rate columns can hold (10 digits, 2 decimals).
pub fn max_rate() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Parameters for one payroll generation run.
///
/// Absent optional figures count as exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The role group whose employees are paid in this run.
    pub role: RoleGroup,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Lateness deduction per minute.
    #[serde(default)]
    pub late_rate_per_minute: Option<Decimal>,
    /// Hours worked on Sundays or rest days.
    #[serde(default)]
    pub sunday_restday_hours: Option<Decimal>,
    /// Pre-computed night differential total.
    #[serde(default)]
    pub night_differential_amount: Option<Decimal>,
    /// SSS loan amortization.
    #[serde(default)]
    pub sss_loan: Option<Decimal>,
    /// Provident fund loan amortization.
    #[serde(default)]
    pub provident_fund_loan: Option<Decimal>,
}

impl PayrollInput {
    /// Creates an input with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{PayrollInput, RoleGroup};
    /// use rust_decimal::Decimal;
    ///
    /// let input = PayrollInput::new(RoleGroup::Staff, Decimal::from(20000));
    /// assert!(input.validate().is_ok());
    /// assert_eq!(input.overtime_hours(), Decimal::ZERO);
    /// ```
    pub fn new(role: RoleGroup, base_salary: Decimal) -> Self {
        Self {
            role,
            base_salary,
            overtime_hours: None,
            late_rate_per_minute: None,
            sunday_restday_hours: None,
            night_differential_amount: None,
            sss_loan: None,
            provident_fund_loan: None,
        }
    }

    /// Checks every field before any computation runs.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary <= Decimal::ZERO {
            return Err(EngineError::validation(
                "base_salary",
                "must be greater than 0",
            ));
        }
        if self.base_salary > max_amount() {
            return Err(EngineError::validation(
                "base_salary",
                format!("must not exceed {}", max_amount()),
            ));
        }

        let hours = [
            ("overtime_hours", self.overtime_hours),
            ("sunday_restday_hours", self.sunday_restday_hours),
        ];
        for (field, value) in hours {
            check_optional(field, value, max_hours())?;
        }

        check_optional("late_rate_per_minute", self.late_rate_per_minute, max_rate())?;

        let amounts = [
            ("night_differential_amount", self.night_differential_amount),
            ("sss_loan", self.sss_loan),
            ("provident_fund_loan", self.provident_fund_loan),
        ];
        for (field, value) in amounts {
            check_optional(field, value, max_amount())?;
        }

        Ok(())
    }

    /// Overtime hours, zero when absent.
    pub fn overtime_hours(&self) -> Decimal {
        self.overtime_hours.unwrap_or_default()
    }

    /// Lateness rate per minute, zero when absent.
    pub fn late_rate_per_minute(&self) -> Decimal {
        self.late_rate_per_minute.unwrap_or_default()
    }

    /// Sunday/rest-day hours, zero when absent.
    pub fn sunday_restday_hours(&self) -> Decimal {
        self.sunday_restday_hours.unwrap_or_default()
    }

    /// Night differential amount, zero when absent.
    pub fn night_differential_amount(&self) -> Decimal {
        self.night_differential_amount.unwrap_or_default()
    }

    /// SSS loan deduction, zero when absent.
    pub fn sss_loan(&self) -> Decimal {
        self.sss_loan.unwrap_or_default()
    }

    /// Provident fund loan deduction, zero when absent.
    pub fn provident_fund_loan(&self) -> Decimal {
        self.provident_fund_loan.unwrap_or_default()
    }
}

fn check_optional(field: &str, value: Option<Decimal>, max: Decimal) -> EngineResult<()> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(EngineError::validation(field, "must not be negative"))
        }
        Some(v) if v > max => Err(EngineError::validation(
            field,
            format!("must not exceed {}", max),
        )),
        _ => Ok(()),
    }
}
