//! Daily and hourly rate derivation.
//!
//! Rates come from the monthly base salary under the fixed working-month
//! assumption of the rate schedule (22 days of 8 hours).

use rust_decimal::Decimal;

use crate::config::WorkMonth;
use crate::models::AuditStep;

use super::round_money;

/// The legal reference for the working-day assumptions.
pub const RATE_DERIVATION_REF: &str = "Labor Code Art. 83";

/// The result of deriving rates from a monthly salary.
#[derive(Debug, Clone)]
pub struct RateDerivation {
    /// Base salary per working day, full precision.
    pub daily_rate: Decimal,
    /// Daily rate per working hour, full precision.
    pub hourly_rate: Decimal,
    /// Paid working days in the month.
    pub days_worked: u32,
    /// Daily rate times days worked, rounded to money.
    pub total_days_amount: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives daily and hourly rates from a monthly base salary.
///
/// `daily = base / days_worked`, `hourly = daily / hours_per_day`, and the
/// total days amount is `daily * days_worked`. Rates are returned unrounded
/// so amounts computed from them do not accumulate rounding error.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_rates;
/// use payroll_engine::config::WorkMonth;
/// use rust_decimal::Decimal;
///
/// let month = WorkMonth {
///     days_worked: 22,
///     hours_per_day: 8,
///     overtime_multiplier: Decimal::new(125, 2),
/// };
/// let result = derive_rates(Decimal::from(20000), &month, 1);
/// assert_eq!(result.total_days_amount, Decimal::from(20000));
/// ```
pub fn derive_rates(base_salary: Decimal, work_month: &WorkMonth, step_number: u32) -> RateDerivation {
    let days = Decimal::from(work_month.days_worked);
    let hours = Decimal::from(work_month.hours_per_day);

    let daily_rate = base_salary / days;
    let hourly_rate = daily_rate / hours;
    let total_days_amount = round_money(daily_rate * days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_derivation".to_string(),
        rule_name: "Rate Derivation".to_string(),
        legal_ref: RATE_DERIVATION_REF.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "days_worked": work_month.days_worked,
            "hours_per_day": work_month.hours_per_day
        }),
        output: serde_json::json!({
            "daily_rate": round_money(daily_rate).to_string(),
            "hourly_rate": round_money(hourly_rate).to_string(),
            "total_days_amount": total_days_amount.to_string()
        }),
        reasoning: format!(
            "₱{} / {} days = ₱{} per day; / {} hours = ₱{} per hour",
            base_salary,
            work_month.days_worked,
            round_money(daily_rate),
            work_month.hours_per_day,
            round_money(hourly_rate)
        ),
    };

    RateDerivation {
        daily_rate,
        hourly_rate,
        days_worked: work_month.days_worked,
        total_days_amount,
        audit_step,
    }
}
