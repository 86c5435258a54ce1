//! In-memory store implementations.
//!
//! Records live in process memory behind `RwLock`s; a restart loses them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    Employee, Holiday, NewHoliday, NewPayrollRecord, PayrollRecord, PayrollRecordId,
    PayrollStatus, RoleGroup,
};

use super::{
    EmployeeDirectory, HolidayStore, PayrollStore, PayrollTransaction, StoreError, StoreResult,
};

/// An employee directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmployeeDirectory {
    employees: Vec<Employee>,
}

impl MemoryEmployeeDirectory {
    /// Creates a directory from a list of employees.
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut employees = employees;
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Self { employees }
    }

    /// Loads a YAML list of employees.
    ///
    /// ```yaml
    /// - id: "EMP-0001"
    ///   name: "Maria Santos"
    ///   role: "Staff"
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let employees: Vec<Employee> = ConfigLoader::load_yaml(path.as_ref())?;
        debug!(count = employees.len(), "Loaded employee directory");
        Ok(Self::new(employees))
    }

    /// Returns every employee, ordered by id.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

impl EmployeeDirectory for MemoryEmployeeDirectory {
    fn list_by_role(&self, role: RoleGroup) -> StoreResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.role == role)
            .cloned()
            .collect())
    }
}

/// A payroll-record store held in memory.
#[derive(Debug)]
pub struct MemoryPayrollStore {
    records: RwLock<BTreeMap<PayrollRecordId, PayrollRecord>>,
    next_id: AtomicU64,
}

impl Default for MemoryPayrollStore {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl MemoryPayrollStore {
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(mut records: Vec<PayrollRecord>) -> Vec<PayrollRecord> {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }
}

struct MemoryTransaction<'a> {
    store: &'a MemoryPayrollStore,
    staged: Vec<(PayrollRecordId, NewPayrollRecord)>,
}

impl PayrollTransaction for MemoryTransaction<'_> {
    fn insert(&mut self, record: NewPayrollRecord) -> StoreResult<PayrollRecordId> {
        let id = self.store.next_id.fetch_add(1, Ordering::Relaxed);
        self.staged.push((id, record));
        Ok(id)
    }

    fn commit(self: Box<Self>) -> StoreResult<Vec<PayrollRecord>> {
        let mut guard = self
            .store
            .records
            .write()
            .map_err(|_| StoreError::poisoned("payroll records"))?;

        let created_at = Utc::now();
        let committed: Vec<PayrollRecord> = self
            .staged
            .into_iter()
            .map(|(id, new)| PayrollRecord::from_new(id, created_at, new))
            .collect();

        for record in &committed {
            guard.insert(record.id, record.clone());
        }

        Ok(committed)
    }

    fn rollback(self: Box<Self>) {
        debug!(staged = self.staged.len(), "Discarding staged payroll records");
    }
}

impl PayrollStore for MemoryPayrollStore {
    fn begin(&self) -> StoreResult<Box<dyn PayrollTransaction + '_>> {
        Ok(Box::new(MemoryTransaction {
            store: self,
            staged: Vec::new(),
        }))
    }

    fn find_by_id(&self, id: PayrollRecordId) -> StoreResult<PayrollRecord> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::poisoned("payroll records"))?;
        guard
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound { id })
    }

    fn update_status(&self, id: PayrollRecordId, status: PayrollStatus) -> StoreResult<PayrollRecord> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::poisoned("payroll records"))?;
        let record = guard
            .get_mut(&id)
            .ok_or(StoreError::RecordNotFound { id })?;
        record.status = status;
        Ok(record.clone())
    }

    fn list(&self) -> StoreResult<Vec<PayrollRecord>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::poisoned("payroll records"))?;
        Ok(Self::newest_first(guard.values().cloned().collect()))
    }

    fn list_for_employee(&self, employee_id: &str) -> StoreResult<Vec<PayrollRecord>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::poisoned("payroll records"))?;
        Ok(Self::newest_first(
            guard
                .values()
                .filter(|r| r.employee_id == employee_id)
                .cloned()
                .collect(),
        ))
    }
}

/// A holiday calendar held in memory, keyed by date.
#[derive(Debug)]
pub struct MemoryHolidayStore {
    holidays: RwLock<BTreeMap<NaiveDate, Holiday>>,
    next_id: AtomicU64,
}

impl Default for MemoryHolidayStore {
    fn default() -> Self {
        Self {
            holidays: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl MemoryHolidayStore {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HolidayStore for MemoryHolidayStore {
    fn insert(&self, holiday: NewHoliday) -> StoreResult<Holiday> {
        let mut guard = self
            .holidays
            .write()
            .map_err(|_| StoreError::poisoned("holidays"))?;

        if let Some(existing) = guard.get(&holiday.date) {
            return Err(StoreError::Conflict {
                field: "date".to_string(),
                message: format!(
                    "{} is already a holiday ({})",
                    holiday.date, existing.name
                ),
            });
        }

        let stored = Holiday {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            date: holiday.date,
            name: holiday.name.trim().to_string(),
            holiday_type: holiday.holiday_type,
            premium_rate: holiday.premium_rate,
            created_at: Utc::now(),
        };
        guard.insert(stored.date, stored.clone());
        Ok(stored)
    }

    fn list(&self) -> StoreResult<Vec<Holiday>> {
        let guard = self
            .holidays
            .read()
            .map_err(|_| StoreError::poisoned("holidays"))?;
        Ok(guard.values().cloned().collect())
    }
}
