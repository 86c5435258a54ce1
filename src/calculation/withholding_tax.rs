//! Withholding tax on taxable income.
//!
//! Taxable income is gross pay less the statutory contributions. The tax is
//! looked up in the progressive table of the schedule in force: the highest
//! bracket whose threshold the income strictly exceeds applies, and income at
//! or below the lowest threshold is not taxed.

use rust_decimal::Decimal;

use crate::config::WithholdingTaxTable;
use crate::models::AuditStep;

use super::round_money;

/// The legal reference for withholding tax.
pub const WITHHOLDING_TAX_REF: &str = "RA 10963 (TRAIN)";

/// The result of a withholding-tax calculation.
#[derive(Debug, Clone)]
pub struct WithholdingTaxResult {
    /// Gross pay less statutory contributions.
    pub taxable_income: Decimal,
    /// The threshold of the bracket applied, if any.
    pub bracket_threshold: Option<Decimal>,
    /// Tax withheld, rounded to money.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates withholding tax on `gross_pay - statutory_contributions`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::{TaxBracket, WithholdingTaxTable};
/// use rust_decimal::Decimal;
///
/// let table = WithholdingTaxTable::new(vec![TaxBracket {
///     threshold: Decimal::from(20833),
///     base_tax: Decimal::ZERO,
///     rate: Decimal::new(15, 2),
/// }]);
/// let result = calculate_withholding_tax(Decimal::from(25833), Decimal::from(1000), &table, 1);
/// assert_eq!(result.amount, Decimal::from(600));
/// ```
pub fn calculate_withholding_tax(
    gross_pay: Decimal,
    statutory_contributions: Decimal,
    table: &WithholdingTaxTable,
    step_number: u32,
) -> WithholdingTaxResult {
    let taxable_income = gross_pay - statutory_contributions;
    let bracket = table.bracket_for(taxable_income);

    let (amount, reasoning) = match bracket {
        Some(bracket) => {
            let excess = taxable_income - bracket.threshold;
            let amount = round_money(bracket.base_tax + bracket.rate * excess);
            let reasoning = format!(
                "Taxable ₱{} is above ₱{}: ₱{} + {} × ₱{} = ₱{}",
                taxable_income,
                bracket.threshold.normalize(),
                bracket.base_tax.normalize(),
                bracket.rate.normalize(),
                excess,
                amount
            );
            (amount, reasoning)
        }
        None => (
            round_money(Decimal::ZERO),
            format!("Taxable ₱{} is not above any bracket threshold; no tax", taxable_income),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        legal_ref: WITHHOLDING_TAX_REF.to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "statutory_contributions": statutory_contributions.to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "bracket_threshold": bracket.map(|b| b.threshold.normalize().to_string()),
            "amount": amount.to_string()
        }),
        reasoning,
    };

    WithholdingTaxResult {
        taxable_income,
        bracket_threshold: bracket.map(|b| b.threshold),
        amount,
        audit_step,
    }
}
