//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{
    ConfigLoader, PagIbigRates, PhilHealthRates, RateSchedule, ScheduleMetadata, SssRates,
    StatutoryConfig, TaxBracket, WithholdingTaxTable, WorkMonth,
};
use crate::models::{Employee, PayrollInput, RoleGroup};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn bracket(threshold: &str, base_tax: &str, rate: &str) -> TaxBracket {
    TaxBracket {
        threshold: dec(threshold),
        base_tax: dec(base_tax),
        rate: dec(rate),
    }
}

/// Mirrors `config/ph_statutory/rates/2026-01-01.yaml`.
pub(crate) fn ph_2026_schedule() -> RateSchedule {
    RateSchedule {
        effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        label: "2026 contribution schedule".to_string(),
        work_month: WorkMonth {
            days_worked: 22,
            hours_per_day: 8,
            overtime_multiplier: dec("1.25"),
        },
        sss: SssRates {
            employee_rate: dec("0.045"),
            max_salary_credit: dec("30000"),
        },
        philhealth: PhilHealthRates {
            employee_rate: dec("0.025"),
            rate_floor_salary: dec("10000"),
            floor_contribution: dec("250"),
            max_contribution: dec("2500"),
        },
        pagibig: PagIbigRates {
            flat_threshold: dec("1500"),
            flat_contribution: dec("200"),
            low_income_rate: dec("0.01"),
        },
        withholding_tax: WithholdingTaxTable::new(vec![
            bracket("666667", "180833.33", "0.35"),
            bracket("166667", "30833.33", "0.30"),
            bracket("66667", "8333.33", "0.25"),
            bracket("33333", "1666.67", "0.20"),
            bracket("20833", "0", "0.15"),
        ]),
    }
}

/// Monthly BIR table with chained base amounts.
pub(crate) fn bir_2023_table() -> WithholdingTaxTable {
    WithholdingTaxTable::new(vec![
        bracket("666667", "183541.80", "0.35"),
        bracket("166667", "33541.80", "0.30"),
        bracket("66667", "8541.80", "0.25"),
        bracket("33333", "1875", "0.20"),
        bracket("20833", "0", "0.15"),
    ])
}

/// A loader holding only the 2026 schedule.
pub(crate) fn ph_loader() -> ConfigLoader {
    ConfigLoader::from_config(StatutoryConfig::new(
        ScheduleMetadata {
            code: "PH-STATUTORY".to_string(),
            name: "Philippine Statutory Payroll Deductions".to_string(),
            jurisdiction: "PH".to_string(),
            source_url: "https://www.bir.gov.ph".to_string(),
        },
        vec![ph_2026_schedule()],
    ))
}

pub(crate) fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

pub(crate) fn employee(id: &str, name: &str, role: RoleGroup) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        role,
    }
}

pub(crate) fn input(role: RoleGroup, base_salary: &str) -> PayrollInput {
    PayrollInput {
        role,
        base_salary: dec(base_salary),
        overtime_hours: None,
        late_rate_per_minute: None,
        sunday_restday_hours: None,
        night_differential_amount: None,
        sss_loan: None,
        provident_fund_loan: None,
    }
}
