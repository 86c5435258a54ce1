//! The payroll engine.
//!
//! A [`PayrollEngine`] runs payroll for one role group at a time: it
//! validates the input, loads the role's employees, computes every payslip in
//! parallel with [`rayon`], and persists the run in a single transaction so
//! either every record is saved or none is.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{PayComponentRules, PayslipCalculation, calculate_payslip};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Holiday, NewHoliday, NewPayrollRecord, PayrollInput, PayrollRecord, PayrollRecordId,
    PayrollStats, PayrollStatus,
};
use crate::store::{EmployeeDirectory, HolidayStore, PayrollStore, StoreError};

/// Runs payroll and serves the payroll-record views.
pub struct PayrollEngine {
    config: ConfigLoader,
    directory: Arc<dyn EmployeeDirectory>,
    payroll: Arc<dyn PayrollStore>,
    holidays: Arc<dyn HolidayStore>,
    rules: PayComponentRules,
}

impl PayrollEngine {
    /// Creates an engine with the default (zero) pay component rules.
    pub fn new(
        config: ConfigLoader,
        directory: Arc<dyn EmployeeDirectory>,
        payroll: Arc<dyn PayrollStore>,
        holidays: Arc<dyn HolidayStore>,
    ) -> Self {
        Self {
            config,
            directory,
            payroll,
            holidays,
            rules: PayComponentRules::default(),
        }
    }

    /// Replaces the pay component rules.
    pub fn with_rules(mut self, rules: PayComponentRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the loaded statutory configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Computes the payslips of a run without saving anything.
    ///
    /// Uses the rate schedule in force on `as_of`.
    pub fn preview_payroll(
        &self,
        input: &PayrollInput,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<PayslipCalculation>> {
        if let Err(err) = input.validate() {
            warn!(role = %input.role, error = %err, "Payroll input rejected");
            return Err(err);
        }

        let schedule = self.config.schedule_on(as_of)?;

        let employees = self.directory.list_by_role(input.role)?;
        if employees.is_empty() {
            warn!(role = %input.role, "No employees in role group");
            return Err(EngineError::EmptyPopulation {
                role: input.role.to_string(),
            });
        }

        let holidays = self.holidays.list()?;

        let calculations = employees
            .par_iter()
            .map(|employee| calculate_payslip(employee, input, schedule, &holidays, &self.rules))
            .collect::<EngineResult<Vec<PayslipCalculation>>>()?;

        for calc in &calculations {
            debug!(
                employee_id = %calc.employee.id,
                gross_pay = %calc.payslip.gross_pay,
                net_pay = %calc.payslip.net_pay,
                duration_us = calc.audit_trace.duration_us,
                "Payslip computed"
            );
            if calc
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "NEGATIVE_NET_PAY")
            {
                warn!(
                    employee_id = %calc.employee.id,
                    net_pay = %calc.payslip.net_pay,
                    "Net pay is negative"
                );
            }
        }

        Ok(calculations)
    }

    /// Runs payroll with the rate schedule in force today (UTC).
    pub fn generate_payroll(&self, input: &PayrollInput) -> EngineResult<Vec<PayrollRecord>> {
        self.generate_payroll_as_of(input, Utc::now().date_naive())
    }

    /// Runs payroll with the rate schedule in force on `as_of` and saves one
    /// pending record per employee.
    ///
    /// Nothing is saved unless every record is.
    pub fn generate_payroll_as_of(
        &self,
        input: &PayrollInput,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let start_time = Instant::now();
        info!(
            role = %input.role,
            base_salary = %input.base_salary,
            as_of = %as_of,
            "Starting payroll run"
        );

        let calculations = self.preview_payroll(input, as_of)?;
        let records = self.persist(input, calculations)?;

        let total_net: Decimal = records.iter().map(|r| r.payslip.net_pay).sum();
        info!(
            role = %input.role,
            created = records.len(),
            total_net_pay = %total_net,
            duration_ms = start_time.elapsed().as_millis(),
            "Payroll run saved"
        );

        Ok(records)
    }

    fn persist(
        &self,
        input: &PayrollInput,
        calculations: Vec<PayslipCalculation>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let mut tx = self
            .payroll
            .begin()
            .map_err(|err| rolled_back(input, None, err))?;

        for calc in calculations {
            let employee_id = calc.employee.id.clone();
            let record = NewPayrollRecord {
                employee_id: calc.employee.id,
                employee_name: calc.employee.name,
                role: input.role,
                payslip: calc.payslip,
            };
            if let Err(err) = tx.insert(record) {
                tx.rollback();
                return Err(rolled_back(input, Some(&employee_id), err));
            }
        }

        tx.commit().map_err(|err| rolled_back(input, None, err))
    }

    /// Fetches one payroll record.
    pub fn find_record(&self, id: PayrollRecordId) -> EngineResult<PayrollRecord> {
        Ok(self.payroll.find_by_id(id)?)
    }

    /// Marks a record approved. Repeating it is harmless.
    pub fn approve(&self, id: PayrollRecordId) -> EngineResult<PayrollRecord> {
        self.set_status(id, PayrollStatus::Approved)
    }

    /// Marks a record rejected. Repeating it is harmless.
    pub fn reject(&self, id: PayrollRecordId) -> EngineResult<PayrollRecord> {
        self.set_status(id, PayrollStatus::Rejected)
    }

    fn set_status(&self, id: PayrollRecordId, status: PayrollStatus) -> EngineResult<PayrollRecord> {
        let record = self.payroll.update_status(id, status)?;
        info!(record_id = id, status = %status, "Payroll record status changed");
        Ok(record)
    }

    /// Lists every payroll record, newest first.
    pub fn list_records(&self) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self.payroll.list()?)
    }

    /// Lists one employee's payroll records, newest first.
    pub fn records_for_employee(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self.payroll.list_for_employee(employee_id)?)
    }

    /// Total approved payout and the number of records awaiting review.
    pub fn stats(&self) -> EngineResult<PayrollStats> {
        let records = self.payroll.list()?;
        Ok(PayrollStats::from_records(&records))
    }

    /// Adds a holiday to the calendar.
    pub fn add_holiday(&self, holiday: NewHoliday) -> EngineResult<Holiday> {
        holiday.validate()?;
        let stored = self.holidays.insert(holiday)?;
        info!(date = %stored.date, name = %stored.name, "Holiday added");
        Ok(stored)
    }

    /// Lists the holiday calendar ordered by date.
    pub fn list_holidays(&self) -> EngineResult<Vec<Holiday>> {
        Ok(self.holidays.list()?)
    }
}

fn rolled_back(input: &PayrollInput, employee_id: Option<&str>, err: StoreError) -> EngineError {
    warn!(
        role = %input.role,
        employee_id = employee_id.unwrap_or("-"),
        error = %err,
        "Payroll run rolled back"
    );
    EngineError::PersistenceFailure {
        message: "the payroll run was rolled back and no records were saved".to_string(),
    }
}
