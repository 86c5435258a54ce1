//! Pag-IBIG employee contribution.

use rust_decimal::Decimal;

use crate::config::PagIbigRates;
use crate::models::AuditStep;

use super::round_money;

/// The legal reference for Pag-IBIG contributions.
pub const PAGIBIG_REF: &str = "RA 9679";

/// The result of a Pag-IBIG contribution calculation.
#[derive(Debug, Clone)]
pub struct PagIbigResult {
    /// The employee contribution, rounded to money.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the Pag-IBIG employee share.
///
/// Salaries strictly above the flat threshold pay the flat contribution;
/// others pay the low-income percentage.
pub fn calculate_pagibig_contribution(
    base_salary: Decimal,
    rates: &PagIbigRates,
    step_number: u32,
) -> PagIbigResult {
    let flat = base_salary > rates.flat_threshold;
    let amount = if flat {
        round_money(rates.flat_contribution)
    } else {
        round_money(base_salary * rates.low_income_rate)
    };

    let reasoning = if flat {
        format!(
            "Salary ₱{} is above ₱{}; flat contribution ₱{}",
            base_salary,
            rates.flat_threshold.normalize(),
            amount
        )
    } else {
        format!(
            "₱{} × {} = ₱{}",
            base_salary,
            rates.low_income_rate.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pagibig_contribution".to_string(),
        rule_name: "Pag-IBIG Contribution".to_string(),
        legal_ref: PAGIBIG_REF.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "flat_threshold": rates.flat_threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "flat_applied": flat,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    PagIbigResult { amount, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, ph_2026_schedule};

    fn pagibig(base: &str) -> PagIbigResult {
        calculate_pagibig_contribution(dec(base), &ph_2026_schedule().pagibig, 8)
    }

    /// PI-001: flat 200 above 1,500
    #[test]
    fn test_flat_above_threshold() {
        for base in ["1500.01", "20000", "1000000"] {
            assert_eq!(pagibig(base).amount, dec("200.00"), "base salary {}", base);
        }
    }

    /// PI-002: 1,500 exactly is on the percentage
    #[test]
    fn test_threshold_is_percentage() {
        let result = pagibig("1500");
        assert_eq!(result.amount, dec("15.00"));
        assert_eq!(result.audit_step.output["flat_applied"], false);
    }

    #[test]
    fn test_low_income_percentage() {
        assert_eq!(pagibig("1000").amount, dec("10.00"));
        assert_eq!(pagibig("999.50").amount, dec("10.00"));
        assert_eq!(pagibig("0.40").amount, dec("0.00"));
    }

    #[test]
    fn test_audit_step_reference() {
        let result = pagibig("20000");
        assert_eq!(result.audit_step.legal_ref, "RA 9679");
        assert_eq!(result.audit_step.output["amount"], "200.00");
    }
}
