//! Payslip computation for one employee.
//!
//! Runs every rule in order, numbering the audit steps as it goes:
//!
//! 1. rate derivation
//! 2. overtime
//! 3. Sunday/special-day slot
//! 4. holiday slot
//! 5. gross pay
//! 6. SSS
//! 7. PhilHealth
//! 8. Pag-IBIG
//! 9. withholding tax
//! 10. lateness slot
//! 11. net pay

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::config::RateSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, Employee, Holiday, PayrollInput, Payslip};

use super::components::{
    ComponentAmount, HOLIDAY_REF, LATENESS_REF, PayComponentRule, PayContext, PayComponentRules,
    SUNDAY_SPECIAL_REF,
};
use super::gross_pay::{GrossComponents, calculate_gross_pay};
use super::overtime::calculate_overtime;
use super::pagibig::calculate_pagibig_contribution;
use super::philhealth::calculate_philhealth_contribution;
use super::rate_derivation::derive_rates;
use super::round_money;
use super::sss::calculate_sss_contribution;
use super::withholding_tax::calculate_withholding_tax;

/// The reference for net pay.
pub const NET_PAY_REF: &str = "Payroll policy: net pay";

/// A computed payslip together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipCalculation {
    /// The employee the payslip belongs to.
    pub employee: Employee,
    /// The itemized payslip.
    pub payslip: Payslip,
    /// Every rule applied, in order, plus any warnings.
    pub audit_trace: AuditTrace,
}

/// Computes one employee's payslip under `schedule`.
///
/// The input is assumed to be validated. It fails when a pay component rule
/// errors or yields a negative amount, or when a computed figure does not fit
/// its payroll column.
pub fn calculate_payslip(
    employee: &Employee,
    input: &PayrollInput,
    schedule: &RateSchedule,
    holidays: &[Holiday],
    rules: &PayComponentRules,
) -> EngineResult<PayslipCalculation> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::with_capacity(11);
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let base_salary = input.base_salary;

    // Rates
    let rates = derive_rates(base_salary, &schedule.work_month, step_number);
    steps.push(rates.audit_step);
    step_number += 1;

    // Overtime
    let overtime = calculate_overtime(
        input.overtime_hours(),
        rates.hourly_rate,
        schedule.work_month.overtime_multiplier,
        step_number,
    );
    steps.push(overtime.audit_step);
    step_number += 1;

    let ctx = PayContext {
        employee,
        input,
        daily_rate: rates.daily_rate,
        hourly_rate: rates.hourly_rate,
        holidays,
    };

    // Reserved earnings slots
    let sunday_special = apply_component(
        rules.sunday_special.as_ref(),
        &ctx,
        ComponentSlot::SUNDAY_SPECIAL,
        step_number,
    )?;
    steps.push(sunday_special.audit_step);
    step_number += 1;

    let holiday = apply_component(
        rules.holiday.as_ref(),
        &ctx,
        ComponentSlot::HOLIDAY,
        step_number,
    )?;
    steps.push(holiday.audit_step);
    step_number += 1;

    // Gross
    let night_amount = round_money(input.night_differential_amount());
    let gross = calculate_gross_pay(
        &GrossComponents {
            total_days_amount: rates.total_days_amount,
            overtime_amount: overtime.amount,
            night_amount,
            sunday_special_amount: sunday_special.amount,
            holiday_amount: holiday.amount,
        },
        step_number,
    );
    steps.push(gross.audit_step);
    step_number += 1;

    // Statutory contributions are computed from the base salary
    let sss = calculate_sss_contribution(base_salary, &schedule.sss, step_number);
    steps.push(sss.audit_step);
    step_number += 1;

    let philhealth = calculate_philhealth_contribution(base_salary, &schedule.philhealth, step_number);
    steps.push(philhealth.audit_step);
    step_number += 1;

    let pagibig = calculate_pagibig_contribution(base_salary, &schedule.pagibig, step_number);
    steps.push(pagibig.audit_step);
    step_number += 1;

    let statutory_total = sss.amount + philhealth.amount + pagibig.amount;
    let tax = calculate_withholding_tax(
        gross.gross_pay,
        statutory_total,
        &schedule.withholding_tax,
        step_number,
    );
    steps.push(tax.audit_step);
    step_number += 1;

    // Lateness comes off net pay only
    let lateness = apply_component(
        rules.lateness.as_ref(),
        &ctx,
        ComponentSlot::LATENESS,
        step_number,
    )?;
    steps.push(lateness.audit_step);
    step_number += 1;

    let late_minutes = lateness
        .quantity
        .trunc()
        .to_u32()
        .ok_or_else(|| EngineError::validation("late_minutes", "is out of range"))?;

    let sss_loan = round_money(input.sss_loan());
    let provident_fund_loan = round_money(input.provident_fund_loan());

    let payslip = {
        let mut payslip = Payslip {
            base_salary: round_money(base_salary),
            days_worked: rates.days_worked,
            daily_rate: round_money(rates.daily_rate),
            hourly_rate: round_money(rates.hourly_rate),
            total_days_amount: rates.total_days_amount,
            night_hours: round_money(Decimal::ZERO),
            night_rate: night_amount,
            night_amount,
            overtime_hours: round_money(input.overtime_hours()),
            overtime_rate: round_money(overtime.rate),
            overtime_amount: overtime.amount,
            sunday_restday_hours: round_money(input.sunday_restday_hours()),
            sunday_special_rate: round_money(sunday_special.rate),
            sunday_special_amount: sunday_special.amount,
            holiday_amount: holiday.amount,
            late_minutes,
            late_rate_per_minute: round_money(input.late_rate_per_minute()),
            late_deduction: lateness.amount,
            sss_deduction: sss.amount,
            philhealth_deduction: philhealth.amount,
            pagibig_deduction: pagibig.amount,
            withholding_tax: tax.amount,
            sss_loan,
            provident_fund_loan,
            gross_pay: gross.gross_pay,
            net_pay: Decimal::ZERO,
        };
        payslip.net_pay = payslip.gross_pay - payslip.total_deductions();
        payslip
    };
    payslip.check_column_capacity()?;

    steps.push(net_pay_step(&payslip, step_number));

    if payslip.net_pay.is_sign_negative() && !payslip.net_pay.is_zero() {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of ₱{} exceed gross pay of ₱{} for employee {}",
                payslip.total_deductions(),
                payslip.gross_pay,
                employee.id
            ),
            severity: "high".to_string(),
        });
    }

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(PayslipCalculation {
        employee: employee.clone(),
        payslip,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

struct ComponentSlot {
    rule_id: &'static str,
    rule_name: &'static str,
    legal_ref: &'static str,
    field: &'static str,
}

impl ComponentSlot {
    const SUNDAY_SPECIAL: ComponentSlot = ComponentSlot {
        rule_id: "sunday_special_pay",
        rule_name: "Sunday/Special-Day Pay",
        legal_ref: SUNDAY_SPECIAL_REF,
        field: "sunday_special_amount",
    };

    const HOLIDAY: ComponentSlot = ComponentSlot {
        rule_id: "holiday_pay",
        rule_name: "Holiday Pay",
        legal_ref: HOLIDAY_REF,
        field: "holiday_amount",
    };

    const LATENESS: ComponentSlot = ComponentSlot {
        rule_id: "lateness_deduction",
        rule_name: "Lateness Deduction",
        legal_ref: LATENESS_REF,
        field: "late_deduction",
    };
}

/// A slot's figures after rounding the amount.
struct AppliedComponent {
    quantity: Decimal,
    rate: Decimal,
    amount: Decimal,
    audit_step: AuditStep,
}

fn apply_component(
    rule: &dyn PayComponentRule,
    ctx: &PayContext<'_>,
    slot: ComponentSlot,
    step_number: u32,
) -> EngineResult<AppliedComponent> {
    let ComponentAmount {
        quantity,
        rate,
        amount,
    } = rule.compute(ctx)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::validation(
            slot.field,
            format!("rule '{}' produced a negative amount {}", rule.name(), amount),
        ));
    }

    let rounded = round_money(amount);
    let audit_step = AuditStep {
        step_number,
        rule_id: slot.rule_id.to_string(),
        rule_name: slot.rule_name.to_string(),
        legal_ref: slot.legal_ref.to_string(),
        input: serde_json::json!({
            "rule": rule.name(),
            "quantity": quantity.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": round_money(rate).to_string(),
            "amount": rounded.to_string()
        }),
        reasoning: if rounded.is_zero() {
            format!("Rule '{}' contributes nothing", rule.name())
        } else {
            format!(
                "Rule '{}': {} × ₱{} = ₱{}",
                rule.name(),
                quantity.normalize(),
                round_money(rate),
                rounded
            )
        },
    };

    Ok(AppliedComponent {
        quantity,
        rate,
        amount: rounded,
        audit_step,
    })
}

fn net_pay_step(payslip: &Payslip, step_number: u32) -> AuditStep {
    let total_deductions = payslip.total_deductions();
    AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        legal_ref: NET_PAY_REF.to_string(),
        input: serde_json::json!({
            "gross_pay": payslip.gross_pay.to_string(),
            "statutory_contributions": payslip.statutory_total().to_string(),
            "withholding_tax": payslip.withholding_tax.to_string(),
            "sss_loan": payslip.sss_loan.to_string(),
            "provident_fund_loan": payslip.provident_fund_loan.to_string(),
            "late_deduction": payslip.late_deduction.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_pay": payslip.net_pay.to_string()
        }),
        reasoning: format!(
            "₱{} gross - ₱{} deductions = ₱{}",
            payslip.gross_pay, total_deductions, payslip.net_pay
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoleGroup, max_amount, max_hours, max_rate};
    use crate::test_support::{dec, employee, input, ph_2026_schedule};
    use std::sync::Arc;

    fn compute(run: &PayrollInput) -> PayslipCalculation {
        compute_with(run, &PayComponentRules::default())
    }

    fn compute_with(run: &PayrollInput, rules: &PayComponentRules) -> PayslipCalculation {
        let emp = employee("EMP-0001", "Maria Santos", run.role);
        calculate_payslip(&emp, run, &ph_2026_schedule(), &[], rules).unwrap()
    }

    struct FixedComponent {
        quantity: &'static str,
        rate: &'static str,
    }

    impl PayComponentRule for FixedComponent {
        fn name(&self) -> &str {
            "fixed"
        }

        fn compute(&self, _ctx: &PayContext<'_>) -> EngineResult<ComponentAmount> {
            let quantity = dec(self.quantity);
            let rate = dec(self.rate);
            Ok(ComponentAmount {
                quantity,
                rate,
                amount: quantity * rate,
            })
        }
    }

    struct SundayPremium;

    impl PayComponentRule for SundayPremium {
        fn name(&self) -> &str {
            "sunday_130"
        }

        fn compute(&self, ctx: &PayContext<'_>) -> EngineResult<ComponentAmount> {
            let hours = ctx.input.sunday_restday_hours();
            let rate = ctx.hourly_rate * dec("1.30");
            Ok(ComponentAmount {
                quantity: hours,
                rate,
                amount: hours * rate,
            })
        }
    }

    /// PS-001: base salary 20,000 with nothing else
    #[test]
    fn test_scenario_base_20000() {
        let calc = compute(&input(RoleGroup::Staff, "20000"));
        let payslip = &calc.payslip;

        assert_eq!(payslip.days_worked, 22);
        assert_eq!(payslip.daily_rate, dec("909.09"));
        assert_eq!(payslip.hourly_rate, dec("113.64"));
        assert_eq!(payslip.total_days_amount, dec("20000.00"));
        assert_eq!(payslip.sss_deduction, dec("900.00"));
        assert_eq!(payslip.philhealth_deduction, dec("500.00"));
        assert_eq!(payslip.pagibig_deduction, dec("200.00"));
        assert_eq!(payslip.withholding_tax, dec("0.00"));
        assert_eq!(payslip.gross_pay, dec("20000.00"));
        assert_eq!(payslip.net_pay, dec("18400.00"));
        assert!(calc.audit_trace.warnings.is_empty());
    }

    /// PS-002: base salary 100,000 with 10 overtime hours
    #[test]
    fn test_scenario_base_100000_with_overtime() {
        let mut run = input(RoleGroup::Manager, "100000");
        run.overtime_hours = Some(dec("10"));
        let payslip = compute(&run).payslip;

        assert_eq!(payslip.overtime_hours, dec("10.00"));
        assert_eq!(payslip.overtime_rate, dec("710.23"));
        assert_eq!(payslip.overtime_amount, dec("7102.27"));
        assert_eq!(payslip.gross_pay, dec("107102.27"));
        assert_eq!(payslip.sss_deduction, dec("1350.00"));
        assert_eq!(payslip.philhealth_deduction, dec("2500.00"));
        assert_eq!(payslip.pagibig_deduction, dec("200.00"));
        assert_eq!(payslip.taxable_income(), dec("103052.27"));
        assert_eq!(payslip.withholding_tax, dec("17429.65"));
        assert_eq!(payslip.net_pay, dec("85622.62"));
    }

    #[test]
    fn test_reserved_fields_are_zero() {
        let mut run = input(RoleGroup::Staff, "20000");
        run.sunday_restday_hours = Some(dec("8"));
        run.late_rate_per_minute = Some(dec("2.5"));
        let payslip = compute(&run).payslip;

        assert_eq!(payslip.sunday_restday_hours, dec("8.00"));
        assert_eq!(payslip.sunday_special_rate, dec("0"));
        assert_eq!(payslip.sunday_special_amount, dec("0"));
        assert_eq!(payslip.holiday_amount, dec("0"));
        assert_eq!(payslip.late_minutes, 0);
        assert_eq!(payslip.late_rate_per_minute, dec("2.50"));
        assert_eq!(payslip.late_deduction, dec("0"));
        assert_eq!(payslip.night_hours, dec("0"));
        assert_eq!(payslip.net_pay, dec("18400.00"));
    }

    #[test]
    fn test_night_differential_adds_to_gross_and_taxable() {
        let mut run = input(RoleGroup::Staff, "20000");
        run.night_differential_amount = Some(dec("5000"));
        let payslip = compute(&run).payslip;

        assert_eq!(payslip.night_rate, dec("5000.00"));
        assert_eq!(payslip.night_amount, dec("5000.00"));
        assert_eq!(payslip.gross_pay, dec("25000.00"));
        // 23400 taxable: 0.15 × (23400 - 20833) = 385.05
        assert_eq!(payslip.withholding_tax, dec("385.05"));
        assert_eq!(payslip.net_pay, dec("23014.95"));
    }

    #[test]
    fn test_loans_reduce_net_only() {
        let mut run = input(RoleGroup::Staff, "20000");
        run.sss_loan = Some(dec("1000"));
        run.provident_fund_loan = Some(dec("500.50"));
        let payslip = compute(&run).payslip;

        assert_eq!(payslip.withholding_tax, dec("0.00"));
        assert_eq!(payslip.total_deductions(), dec("3100.50"));
        assert_eq!(payslip.net_pay, dec("16899.50"));
    }

    #[test]
    fn test_negative_net_pay_is_kept_and_flagged() {
        let mut run = input(RoleGroup::Staff, "20000");
        run.sss_loan = Some(dec("30000"));
        let calc = compute(&run);

        assert_eq!(calc.payslip.net_pay, dec("-11600.00"));
        assert_eq!(calc.audit_trace.warnings.len(), 1);
        assert_eq!(calc.audit_trace.warnings[0].code, "NEGATIVE_NET_PAY");
        assert_eq!(calc.audit_trace.warnings[0].severity, "high");
        assert!(calc.audit_trace.warnings[0].message.contains("₱20000.00"));
    }

    #[test]
    fn test_audit_trace_order() {
        let calc = compute(&input(RoleGroup::Staff, "20000"));
        let rule_ids: Vec<&str> = calc
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "rate_derivation",
                "overtime_pay",
                "sunday_special_pay",
                "holiday_pay",
                "gross_pay",
                "sss_contribution",
                "philhealth_contribution",
                "pagibig_contribution",
                "withholding_tax",
                "lateness_deduction",
                "net_pay",
            ]
        );
        for (index, step) in calc.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, index + 1);
        }
        assert_eq!(
            calc.audit_trace.step("net_pay").unwrap().output["net_pay"],
            "18400.00"
        );
    }

    #[test]
    fn test_sunday_rule_adds_to_gross_and_taxable() {
        let rules = PayComponentRules {
            sunday_special: Arc::new(SundayPremium),
            ..Default::default()
        };
        let mut run = input(RoleGroup::Staff, "20000");
        run.sunday_restday_hours = Some(dec("8"));
        let payslip = compute_with(&run, &rules).payslip;

        // 8 × 113.6363... × 1.30 = 1181.8181...
        assert_eq!(payslip.sunday_special_rate, dec("147.73"));
        assert_eq!(payslip.sunday_special_amount, dec("1181.82"));
        assert_eq!(payslip.gross_pay, dec("21181.82"));
        assert_eq!(payslip.taxable_income(), dec("19581.82"));
        assert_eq!(payslip.net_pay, dec("19581.82"));
    }

    #[test]
    fn test_holiday_rule_adds_to_gross() {
        let rules = PayComponentRules {
            holiday: Arc::new(FixedComponent {
                quantity: "1",
                rate: "909.09",
            }),
            ..Default::default()
        };
        let payslip = compute_with(&input(RoleGroup::Staff, "20000"), &rules).payslip;

        assert_eq!(payslip.holiday_amount, dec("909.09"));
        assert_eq!(payslip.gross_pay, dec("20909.09"));
    }

    #[test]
    fn test_lateness_rule_reduces_net_but_not_taxable() {
        let rules = PayComponentRules {
            lateness: Arc::new(FixedComponent {
                quantity: "30",
                rate: "5",
            }),
            ..Default::default()
        };
        let payslip = compute_with(&input(RoleGroup::Staff, "20000"), &rules).payslip;

        assert_eq!(payslip.late_minutes, 30);
        assert_eq!(payslip.late_deduction, dec("150.00"));
        assert_eq!(payslip.taxable_income(), dec("18400.00"));
        assert_eq!(payslip.net_pay, dec("18250.00"));
    }

    #[test]
    fn test_negative_component_is_rejected() {
        let rules = PayComponentRules {
            holiday: Arc::new(FixedComponent {
                quantity: "1",
                rate: "-100",
            }),
            ..Default::default()
        };
        let emp = employee("EMP-0001", "Maria Santos", RoleGroup::Staff);
        let result = calculate_payslip(
            &emp,
            &input(RoleGroup::Staff, "20000"),
            &ph_2026_schedule(),
            &[],
            &rules,
        );

        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "holiday_amount"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    fn compute_result(run: &PayrollInput) -> EngineResult<PayslipCalculation> {
        let emp = employee("EMP-0001", "Maria Santos", run.role);
        calculate_payslip(&emp, run, &ph_2026_schedule(), &[], &PayComponentRules::default())
    }

    #[test]
    fn test_largest_base_salary_fits_columns() {
        let run = PayrollInput::new(RoleGroup::Manager, max_amount());
        let payslip = compute_result(&run).unwrap().payslip;

        assert_eq!(payslip.gross_pay, max_amount());
        assert!(payslip.net_pay < payslip.gross_pay);
    }

    #[test]
    fn test_gross_over_column_capacity_is_rejected() {
        let mut run = PayrollInput::new(RoleGroup::Manager, max_amount());
        run.overtime_hours = Some(dec("1"));
        assert!(run.validate().is_ok());

        match compute_result(&run) {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "gross_pay");
                assert!(message.contains("exceeds column capacity"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_every_input_at_its_limit_is_rejected() {
        let run = PayrollInput {
            role: RoleGroup::Staff,
            base_salary: max_amount(),
            overtime_hours: Some(max_hours()),
            late_rate_per_minute: Some(max_rate()),
            sunday_restday_hours: Some(max_hours()),
            night_differential_amount: Some(max_amount()),
            sss_loan: Some(max_amount()),
            provident_fund_loan: Some(max_amount()),
        };
        assert!(run.validate().is_ok());

        assert!(matches!(
            compute_result(&run),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_payslip_adds_up() {
        let mut run = input(RoleGroup::Manager, "87654.32");
        run.overtime_hours = Some(dec("12.5"));
        run.night_differential_amount = Some(dec("1234.56"));
        run.sss_loan = Some(dec("800"));
        let payslip = compute(&run).payslip;

        assert_eq!(
            payslip.gross_pay,
            payslip.total_days_amount + payslip.overtime_amount + payslip.night_amount
        );
        assert_eq!(payslip.net_pay, payslip.gross_pay - payslip.total_deductions());
        assert_eq!(payslip.gross_pay.scale(), 2);
        assert_eq!(payslip.net_pay.scale(), 2);
    }
}
