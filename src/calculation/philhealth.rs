//! PhilHealth employee contribution.

use rust_decimal::Decimal;

use crate::config::PhilHealthRates;
use crate::models::AuditStep;

use super::round_money;

/// The legal reference for PhilHealth contributions.
pub const PHILHEALTH_REF: &str = "RA 11223";

/// The result of a PhilHealth contribution calculation.
#[derive(Debug, Clone)]
pub struct PhilHealthResult {
    /// The employee contribution, rounded to money.
    pub amount: Decimal,
    /// Whether the maximum contribution was applied.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the PhilHealth employee share.
///
/// Salaries at or above the floor salary pay the percentage rate; lower
/// salaries pay the flat floor contribution. Either result is then capped at
/// the maximum contribution. Under the shipped schedule the cap can only bind
/// on the percentage branch, but it is applied to both.
pub fn calculate_philhealth_contribution(
    base_salary: Decimal,
    rates: &PhilHealthRates,
    step_number: u32,
) -> PhilHealthResult {
    let on_rate = base_salary >= rates.rate_floor_salary;
    let uncapped = if on_rate {
        base_salary * rates.employee_rate
    } else {
        rates.floor_contribution
    };
    let cap_applied = uncapped > rates.max_contribution;
    let amount = round_money(uncapped.min(rates.max_contribution));

    let reasoning = match (on_rate, cap_applied) {
        (true, true) => format!(
            "₱{} × {} = ₱{} (capped at maximum ₱{})",
            base_salary,
            rates.employee_rate.normalize(),
            round_money(uncapped),
            amount
        ),
        (true, false) => format!(
            "₱{} × {} = ₱{}",
            base_salary,
            rates.employee_rate.normalize(),
            amount
        ),
        (false, _) => format!(
            "Salary ₱{} is below ₱{}; flat contribution ₱{}",
            base_salary,
            rates.rate_floor_salary.normalize(),
            amount
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "philhealth_contribution".to_string(),
        rule_name: "PhilHealth Contribution".to_string(),
        legal_ref: PHILHEALTH_REF.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "employee_rate": rates.employee_rate.normalize().to_string(),
            "rate_floor_salary": rates.rate_floor_salary.normalize().to_string(),
            "floor_contribution": rates.floor_contribution.normalize().to_string(),
            "max_contribution": rates.max_contribution.normalize().to_string()
        }),
        output: serde_json::json!({
            "percentage_applied": on_rate,
            "cap_applied": cap_applied,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    PhilHealthResult {
        amount,
        cap_applied,
        audit_step,
    }
}
