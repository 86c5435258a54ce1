//! Gross pay aggregation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The reference for earnings aggregation.
pub const GROSS_PAY_REF: &str = "Payroll policy: earnings";

/// The rounded earnings that make up gross pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrossComponents {
    /// Daily rate times days worked.
    pub total_days_amount: Decimal,
    /// Overtime pay.
    pub overtime_amount: Decimal,
    /// Night differential.
    pub night_amount: Decimal,
    /// Sunday/special-day pay.
    pub sunday_special_amount: Decimal,
    /// Holiday pay.
    pub holiday_amount: Decimal,
}

/// The result of summing gross pay.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums every earning into gross pay.
pub fn calculate_gross_pay(components: &GrossComponents, step_number: u32) -> GrossPayResult {
    let gross_pay = components.total_days_amount
        + components.overtime_amount
        + components.night_amount
        + components.sunday_special_amount
        + components.holiday_amount;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        legal_ref: GROSS_PAY_REF.to_string(),
        input: serde_json::json!({
            "total_days_amount": components.total_days_amount.to_string(),
            "overtime_amount": components.overtime_amount.to_string(),
            "night_amount": components.night_amount.to_string(),
            "sunday_special_amount": components.sunday_special_amount.to_string(),
            "holiday_amount": components.holiday_amount.to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "₱{} days + ₱{} overtime + ₱{} night differential + ₱{} Sunday/special + ₱{} holiday = ₱{}",
            components.total_days_amount,
            components.overtime_amount,
            components.night_amount,
            components.sunday_special_amount,
            components.holiday_amount,
            gross_pay
        ),
    };

    GrossPayResult {
        gross_pay,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dec;

    #[test]
    fn test_days_only() {
        let components = GrossComponents {
            total_days_amount: dec("20000.00"),
            ..Default::default()
        };
        let result = calculate_gross_pay(&components, 5);
        assert_eq!(result.gross_pay, dec("20000.00"));
    }

    #[test]
    fn test_all_components_summed() {
        let components = GrossComponents {
            total_days_amount: dec("100000.00"),
            overtime_amount: dec("7102.27"),
            night_amount: dec("1500.00"),
            sunday_special_amount: dec("10.01"),
            holiday_amount: dec("0.99"),
        };
        let result = calculate_gross_pay(&components, 5);

        assert_eq!(result.gross_pay, dec("108613.27"));
        assert_eq!(result.audit_step.output["gross_pay"], "108613.27");
        assert_eq!(result.audit_step.rule_id, "gross_pay");
    }
}
