//! Itemized payslip produced for one employee in one run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{max_amount, max_hours, max_rate};

/// Every pay component, deduction and total of one payslip.
///
/// All money fields hold two decimal places. Gross and net pay are sums of
/// the stored components, so a payslip always adds up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Paid working days in the month.
    pub days_worked: u32,
    /// Base salary per working day.
    pub daily_rate: Decimal,
    /// Daily rate per working hour.
    pub hourly_rate: Decimal,
    /// Daily rate times days worked.
    pub total_days_amount: Decimal,

    /// Night hours (not collected; always zero).
    pub night_hours: Decimal,
    /// Night differential as entered.
    pub night_rate: Decimal,
    /// Night differential paid.
    pub night_amount: Decimal,

    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Overtime hourly rate.
    pub overtime_rate: Decimal,
    /// Overtime paid.
    pub overtime_amount: Decimal,

    /// Sunday or rest-day hours as entered.
    pub sunday_restday_hours: Decimal,
    /// Sunday/special-day rate.
    pub sunday_special_rate: Decimal,
    /// Sunday/special-day pay.
    pub sunday_special_amount: Decimal,
    /// Holiday pay.
    pub holiday_amount: Decimal,

    /// Minutes late.
    pub late_minutes: u32,
    /// Lateness rate per minute as entered.
    pub late_rate_per_minute: Decimal,
    /// Lateness deduction.
    pub late_deduction: Decimal,

    /// SSS employee contribution.
    pub sss_deduction: Decimal,
    /// PhilHealth employee contribution.
    pub philhealth_deduction: Decimal,
    /// Pag-IBIG employee contribution.
    pub pagibig_deduction: Decimal,
    /// Income tax withheld.
    pub withholding_tax: Decimal,

    /// SSS loan amortization.
    pub sss_loan: Decimal,
    /// Provident fund loan amortization.
    pub provident_fund_loan: Decimal,

    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// Gross pay minus total deductions. May be negative.
    pub net_pay: Decimal,
}

impl Payslip {
    /// Sum of the three statutory contributions.
    pub fn statutory_total(&self) -> Decimal {
        self.sss_deduction + self.philhealth_deduction + self.pagibig_deduction
    }

    /// Gross pay less statutory contributions.
    pub fn taxable_income(&self) -> Decimal {
        self.gross_pay - self.statutory_total()
    }

    /// Every deduction on the payslip, lateness and loans included.
    pub fn total_deductions(&self) -> Decimal {
        self.statutory_total()
            + self.withholding_tax
            + self.sss_loan
            + self.provident_fund_loan
            + self.late_deduction
    }

    /// Checks every stored figure against the precision of its payroll column.
    ///
    /// Money columns hold 13 integer digits, rate columns 8 and hour columns 6.
    /// Net pay may be negative; its magnitude is checked.
    pub fn check_column_capacity(&self) -> EngineResult<()> {
        let columns = [
            ("base_salary", self.base_salary, max_amount()),
            ("daily_rate", self.daily_rate, max_amount()),
            ("hourly_rate", self.hourly_rate, max_amount()),
            ("total_days_amount", self.total_days_amount, max_amount()),
            ("night_hours", self.night_hours, max_hours()),
            ("night_rate", self.night_rate, max_rate()),
            ("night_amount", self.night_amount, max_amount()),
            ("overtime_hours", self.overtime_hours, max_hours()),
            ("overtime_rate", self.overtime_rate, max_amount()),
            ("overtime_amount", self.overtime_amount, max_amount()),
            ("sunday_restday_hours", self.sunday_restday_hours, max_hours()),
            ("sunday_special_rate", self.sunday_special_rate, max_amount()),
            ("sunday_special_amount", self.sunday_special_amount, max_amount()),
            ("holiday_amount", self.holiday_amount, max_amount()),
            ("late_rate_per_minute", self.late_rate_per_minute, max_rate()),
            ("late_deduction", self.late_deduction, max_amount()),
            ("sss_deduction", self.sss_deduction, max_amount()),
            ("philhealth_deduction", self.philhealth_deduction, max_amount()),
            ("pagibig_deduction", self.pagibig_deduction, max_amount()),
            ("withholding_tax", self.withholding_tax, max_amount()),
            ("sss_loan", self.sss_loan, max_amount()),
            ("provident_fund_loan", self.provident_fund_loan, max_amount()),
            ("gross_pay", self.gross_pay, max_amount()),
            ("net_pay", self.net_pay, max_amount()),
        ];

        for (field, value, max) in columns {
            if value.abs() > max {
                return Err(EngineError::validation(
                    field,
                    format!("{} exceeds column capacity (max {})", value, max),
                ));
            }
        }

        if self.late_minutes > i32::MAX as u32 {
            return Err(EngineError::validation(
                "late_minutes",
                "exceeds column capacity",
            ));
        }

        Ok(())
    }
}
