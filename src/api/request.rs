//! Request types for the Payroll Engine API.
//!
//! Form-style clients send blank strings for fields they leave empty; every
//! optional figure treats `""` and `null` the same as an absent field.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, RoleGroup};

/// Request body for `POST /payroll/generate` and `POST /payroll/preview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Role group label, `"Staff"` or `"Manager"`.
    #[serde(default)]
    pub role: String,
    /// Monthly base salary.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub base_salary: Option<Decimal>,
    /// Overtime hours worked.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub overtime_hours: Option<Decimal>,
    /// Lateness deduction per minute.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub late_rate_per_minute: Option<Decimal>,
    /// Hours worked on Sundays or rest days.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sunday_restday_hours: Option<Decimal>,
    /// Pre-computed night differential total.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub night_differential_amount: Option<Decimal>,
    /// SSS loan amortization.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sss_loan: Option<Decimal>,
    /// Provident fund loan amortization.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub provident_fund_loan: Option<Decimal>,
    /// Date selecting the rate schedule. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl GeneratePayrollRequest {
    /// Converts the request into a run input.
    ///
    /// Only presence and the role label are checked here; ranges are checked
    /// by [`PayrollInput::validate`].
    pub fn into_input(self) -> EngineResult<PayrollInput> {
        let role = RoleGroup::from_str(&self.role)?;
        let base_salary = self
            .base_salary
            .ok_or_else(|| EngineError::validation("base_salary", "is required"))?;

        Ok(PayrollInput {
            role,
            base_salary,
            overtime_hours: self.overtime_hours,
            late_rate_per_minute: self.late_rate_per_minute,
            sunday_restday_hours: self.sunday_restday_hours,
            night_differential_amount: self.night_differential_amount,
            sss_loan: self.sss_loan,
            provident_fund_loan: self.provident_fund_loan,
        })
    }
}

/// Reads an optional decimal given as a string, a number, `""` or `null`.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(de::Error::custom(format!(
                "expected a decimal number, found {}",
                other
            )));
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("'{}' is not a decimal number", text)))
}
