//! SSS employee contribution.
//!
//! The employee share is a flat percentage of the monthly salary credit,
//! which is the base salary capped at the schedule's maximum credit.

use rust_decimal::Decimal;

use crate::config::SssRates;
use crate::models::AuditStep;

use super::round_money;

/// The legal reference for SSS contributions.
pub const SSS_REF: &str = "RA 11199";

/// The result of an SSS contribution calculation.
#[derive(Debug, Clone)]
pub struct SssResult {
    /// The salary credit the rate was applied to.
    pub monthly_salary_credit: Decimal,
    /// The employee contribution, rounded to money.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the SSS employee share: `min(base_salary, max_credit) * rate`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_sss_contribution;
/// use payroll_engine::config::SssRates;
/// use rust_decimal::Decimal;
///
/// let rates = SssRates {
///     employee_rate: Decimal::new(45, 3),
///     max_salary_credit: Decimal::from(30000),
/// };
/// let result = calculate_sss_contribution(Decimal::from(100000), &rates, 1);
/// assert_eq!(result.amount, Decimal::from(1350));
/// ```
pub fn calculate_sss_contribution(base_salary: Decimal, rates: &SssRates, step_number: u32) -> SssResult {
    let monthly_salary_credit = base_salary.min(rates.max_salary_credit);
    let capped = monthly_salary_credit < base_salary;
    let amount = round_money(monthly_salary_credit * rates.employee_rate);

    let reasoning = if capped {
        format!(
            "Salary ₱{} exceeds maximum credit ₱{}; ₱{} × {} = ₱{}",
            base_salary,
            rates.max_salary_credit.normalize(),
            monthly_salary_credit.normalize(),
            rates.employee_rate.normalize(),
            amount
        )
    } else {
        format!(
            "₱{} × {} = ₱{}",
            monthly_salary_credit,
            rates.employee_rate.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "sss_contribution".to_string(),
        rule_name: "SSS Contribution".to_string(),
        legal_ref: SSS_REF.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "employee_rate": rates.employee_rate.normalize().to_string(),
            "max_salary_credit": rates.max_salary_credit.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_salary_credit": monthly_salary_credit.normalize().to_string(),
            "credit_capped": capped,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    SssResult {
        monthly_salary_credit,
        amount,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, ph_2026_schedule};

    fn sss(base: &str) -> SssResult {
        calculate_sss_contribution(dec(base), &ph_2026_schedule().sss, 6)
    }

    /// SSS-001: below the credit ceiling
    #[test]
    fn test_below_ceiling() {
        let result = sss("20000");
        assert_eq!(result.monthly_salary_credit, dec("20000"));
        assert_eq!(result.amount, dec("900.00"));
        assert_eq!(result.audit_step.output["credit_capped"], false);
    }

    /// SSS-002: exactly at the ceiling
    #[test]
    fn test_at_ceiling() {
        let result = sss("30000");
        assert_eq!(result.amount, dec("1350.00"));
        assert_eq!(result.audit_step.output["credit_capped"], false);
    }

    /// SSS-003: above the ceiling
    #[test]
    fn test_above_ceiling_is_constant() {
        for base in ["30000.01", "45000", "100000", "9999999999999.99"] {
            let result = sss(base);
            assert_eq!(result.monthly_salary_credit, dec("30000"));
            assert_eq!(result.amount, dec("1350.00"), "base salary {}", base);
        }
        assert_eq!(sss("100000").audit_step.output["credit_capped"], true);
    }

    #[test]
    fn test_rounding_of_small_salary() {
        // 1234.57 × 0.045 = 55.55565
        assert_eq!(sss("1234.57").amount, dec("55.56"));
    }

    #[test]
    fn test_audit_step_reference() {
        let result = sss("20000");
        assert_eq!(result.audit_step.legal_ref, "RA 11199");
        assert_eq!(result.audit_step.step_number, 6);
        assert!(result.audit_step.reasoning.contains("₱900.00"));
        assert!(!result.audit_step.reasoning.contains('$'));
    }
}
