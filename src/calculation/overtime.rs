//! Overtime pay calculation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::round_money;

/// The legal reference for overtime premium pay.
pub const OVERTIME_REF: &str = "Labor Code Art. 87";

/// The result of an overtime calculation.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// Overtime hourly rate, full precision.
    pub rate: Decimal,
    /// Overtime pay, rounded to money.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay as `hours * hourly_rate * multiplier`.
///
/// The overtime rate is produced even when no overtime was worked so it can
/// be shown on the payslip.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime;
/// use rust_decimal::Decimal;
///
/// let result = calculate_overtime(Decimal::from(2), Decimal::from(100), Decimal::new(125, 2), 1);
/// assert_eq!(result.amount, Decimal::from(250));
/// ```
pub fn calculate_overtime(
    hours: Decimal,
    hourly_rate: Decimal,
    multiplier: Decimal,
    step_number: u32,
) -> OvertimeResult {
    let rate = hourly_rate * multiplier;
    let amount = round_money(hours * rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        legal_ref: OVERTIME_REF.to_string(),
        input: serde_json::json!({
            "overtime_hours": hours.normalize().to_string(),
            "hourly_rate": round_money(hourly_rate).to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_rate": round_money(rate).to_string(),
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "{} hours × ₱{} (hourly × {}) = ₱{}",
            hours.normalize(),
            round_money(rate),
            multiplier.normalize(),
            amount
        ),
    };

    OvertimeResult {
        rate,
        amount,
        audit_step,
    }
}
