//! Configuration types for statutory payroll rates.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the statutory schedule set.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier for the schedule set (e.g., "PH-STATUTORY").
    pub code: String,
    /// The human-readable name of the schedule set.
    pub name: String,
    /// The jurisdiction the rates apply to.
    pub jurisdiction: String,
    /// URL to the official rate documentation.
    pub source_url: String,
}

/// Working-month assumptions used to derive daily and hourly rates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkMonth {
    /// Number of paid working days in a month.
    pub days_worked: u32,
    /// Number of working hours in a day.
    pub hours_per_day: u32,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
}

/// SSS employee-share contribution parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SssRates {
    /// Employee share applied to the monthly salary credit.
    pub employee_rate: Decimal,
    /// The ceiling of the monthly salary credit.
    pub max_salary_credit: Decimal,
}

/// PhilHealth employee-share contribution parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhilHealthRates {
    /// Employee share applied to the base salary.
    pub employee_rate: Decimal,
    /// Salaries at or above this value pay the percentage rate.
    pub rate_floor_salary: Decimal,
    /// Flat contribution below the floor salary.
    pub floor_contribution: Decimal,
    /// The maximum employee contribution.
    pub max_contribution: Decimal,
}

/// Pag-IBIG employee-share contribution parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PagIbigRates {
    /// Salaries strictly above this value pay the flat contribution.
    pub flat_threshold: Decimal,
    /// Flat monthly contribution.
    pub flat_contribution: Decimal,
    /// Percentage applied at or below the flat threshold.
    pub low_income_rate: Decimal,
}

/// One row of the withholding-tax table.
///
/// Income strictly above `threshold` pays `base_tax` plus `rate` on the excess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The income level this bracket starts above.
    pub threshold: Decimal,
    /// Tax owed on income up to the threshold.
    pub base_tax: Decimal,
    /// Marginal rate on the excess over the threshold.
    pub rate: Decimal,
}

/// A bracket boundary where the tax table jumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketGap {
    /// The threshold at which the jump happens.
    pub threshold: Decimal,
    /// Tax owed at exactly the threshold (computed with the bracket below).
    pub tax_at_threshold: Decimal,
    /// Base tax of the bracket starting above the threshold.
    pub base_tax: Decimal,
    /// `base_tax - tax_at_threshold`; negative means tax drops across the boundary.
    pub gap: Decimal,
}

#[derive(Deserialize)]
struct TaxTableFile {
    brackets: Vec<TaxBracket>,
}

/// Progressive withholding-tax table.
///
/// Brackets are kept sorted from the highest threshold down, which is the
/// order they are evaluated in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TaxTableFile")]
pub struct WithholdingTaxTable {
    brackets: Vec<TaxBracket>,
}

impl From<TaxTableFile> for WithholdingTaxTable {
    fn from(file: TaxTableFile) -> Self {
        Self::new(file.brackets)
    }
}

impl WithholdingTaxTable {
    /// Creates a table from brackets in any order.
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        let mut brackets = brackets;
        brackets.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self { brackets }
    }

    /// Returns the brackets, highest threshold first.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the highest bracket whose threshold `taxable_income` strictly exceeds.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{TaxBracket, WithholdingTaxTable};
    /// use rust_decimal::Decimal;
    ///
    /// let table = WithholdingTaxTable::new(vec![TaxBracket {
    ///     threshold: Decimal::from(20833),
    ///     base_tax: Decimal::ZERO,
    ///     rate: Decimal::new(15, 2),
    /// }]);
    /// assert!(table.bracket_for(Decimal::from(20833)).is_none());
    /// assert!(table.bracket_for(Decimal::from(20834)).is_some());
    /// ```
    pub fn bracket_for(&self, taxable_income: Decimal) -> Option<&TaxBracket> {
        self.brackets
            .iter()
            .find(|bracket| taxable_income > bracket.threshold)
    }

    /// Reports every boundary where tax does not carry over continuously.
    ///
    /// Tax at a threshold is computed with the bracket below it (or zero for the
    /// lowest threshold) and compared with the base tax of the bracket above.
    pub fn boundary_gaps(&self) -> Vec<BracketGap> {
        let ascending: Vec<&TaxBracket> = self.brackets.iter().rev().collect();
        let mut gaps = Vec::new();

        for (index, upper) in ascending.iter().enumerate() {
            let tax_at_threshold = match index.checked_sub(1).map(|i| ascending[i]) {
                Some(lower) => lower.base_tax + lower.rate * (upper.threshold - lower.threshold),
                None => Decimal::ZERO,
            };
            let gap = upper.base_tax - tax_at_threshold;
            if !gap.is_zero() {
                gaps.push(BracketGap {
                    threshold: upper.threshold,
                    tax_at_threshold,
                    base_tax: upper.base_tax,
                    gap,
                });
            }
        }

        gaps
    }
}

/// The complete set of statutory rates in force from one effective date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateSchedule {
    /// The first date this schedule applies to.
    pub effective_date: NaiveDate,
    /// Human-readable label for the schedule.
    pub label: String,
    /// Working-month assumptions.
    pub work_month: WorkMonth,
    /// SSS parameters.
    pub sss: SssRates,
    /// PhilHealth parameters.
    pub philhealth: PhilHealthRates,
    /// Pag-IBIG parameters.
    pub pagibig: PagIbigRates,
    /// Withholding-tax brackets.
    pub withholding_tax: WithholdingTaxTable,
}

impl RateSchedule {
    /// Checks the values a computation cannot run without.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_month.days_worked == 0 {
            return Err("work_month.days_worked must be greater than 0".to_string());
        }
        if self.work_month.hours_per_day == 0 {
            return Err("work_month.hours_per_day must be greater than 0".to_string());
        }

        let rates = [
            ("work_month.overtime_multiplier", self.work_month.overtime_multiplier),
            ("sss.employee_rate", self.sss.employee_rate),
            ("sss.max_salary_credit", self.sss.max_salary_credit),
            ("philhealth.employee_rate", self.philhealth.employee_rate),
            ("philhealth.rate_floor_salary", self.philhealth.rate_floor_salary),
            ("philhealth.floor_contribution", self.philhealth.floor_contribution),
            ("philhealth.max_contribution", self.philhealth.max_contribution),
            ("pagibig.flat_threshold", self.pagibig.flat_threshold),
            ("pagibig.flat_contribution", self.pagibig.flat_contribution),
            ("pagibig.low_income_rate", self.pagibig.low_income_rate),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, value)| value.is_sign_negative()) {
            return Err(format!("{} must not be negative", name));
        }

        for bracket in self.withholding_tax.brackets() {
            if bracket.threshold.is_sign_negative()
                || bracket.base_tax.is_sign_negative()
                || bracket.rate.is_sign_negative()
            {
                return Err(format!(
                    "withholding_tax bracket above {} has a negative value",
                    bracket.threshold
                ));
            }
        }

        Ok(())
    }
}

/// The statutory configuration loaded from a config directory.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    /// Schedule set metadata.
    metadata: ScheduleMetadata,
    /// Rate schedules by effective date (sorted oldest first).
    schedules: Vec<RateSchedule>,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(metadata: ScheduleMetadata, schedules: Vec<RateSchedule>) -> Self {
        let mut sorted = schedules;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            schedules: sorted,
        }
    }

    /// Returns the schedule set metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns all rate schedules, oldest first.
    pub fn schedules(&self) -> &[RateSchedule] {
        &self.schedules
    }

    /// Returns the most recent schedule effective on or before `date`.
    pub fn schedule_on(&self, date: NaiveDate) -> Option<&RateSchedule> {
        self.schedules.iter().rfind(|s| s.effective_date <= date)
    }
}
