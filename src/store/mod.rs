//! Storage collaborators of the Payroll Engine.
//!
//! The engine only talks to these traits: a read-only employee directory, a
//! transactional payroll-record store, and the holiday calendar. In-memory
//! implementations are provided for the server and for tests.

mod error;
mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryEmployeeDirectory, MemoryHolidayStore, MemoryPayrollStore};

use crate::models::{
    Employee, Holiday, NewHoliday, NewPayrollRecord, PayrollRecord, PayrollRecordId,
    PayrollStatus, RoleGroup,
};

/// Read-only access to employees.
pub trait EmployeeDirectory: Send + Sync {
    /// Lists every employee in `role`, ordered by id.
    fn list_by_role(&self, role: RoleGroup) -> StoreResult<Vec<Employee>>;
}

/// One open batch write.
///
/// Nothing inserted is visible until [`commit`](PayrollTransaction::commit).
/// Dropping a transaction without committing discards it.
pub trait PayrollTransaction {
    /// Stages a record and returns the id it will have once committed.
    fn insert(&mut self, record: NewPayrollRecord) -> StoreResult<PayrollRecordId>;

    /// Makes every staged record visible at once.
    fn commit(self: Box<Self>) -> StoreResult<Vec<PayrollRecord>>;

    /// Discards every staged record.
    fn rollback(self: Box<Self>);
}

/// Payroll-record storage.
pub trait PayrollStore: Send + Sync {
    /// Opens a batch write.
    fn begin(&self) -> StoreResult<Box<dyn PayrollTransaction + '_>>;

    /// Fetches one record.
    fn find_by_id(&self, id: PayrollRecordId) -> StoreResult<PayrollRecord>;

    /// Sets the status of one record and returns it.
    fn update_status(&self, id: PayrollRecordId, status: PayrollStatus) -> StoreResult<PayrollRecord>;

    /// Lists every record, newest first.
    fn list(&self) -> StoreResult<Vec<PayrollRecord>>;

    /// Lists the records of one employee, newest first.
    fn list_for_employee(&self, employee_id: &str) -> StoreResult<Vec<PayrollRecord>>;
}

/// Holiday calendar storage.
pub trait HolidayStore: Send + Sync {
    /// Adds a holiday. A second holiday on the same date is a conflict.
    fn insert(&self, holiday: NewHoliday) -> StoreResult<Holiday>;

    /// Lists holidays ordered by date.
    fn list(&self) -> StoreResult<Vec<Holiday>>;
}
