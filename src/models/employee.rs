//! Employee model and related types.
//!
//! This module defines the Employee struct and the RoleGroup enum used to
//! select the population of a payroll run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// The payroll-eligible role groups.
///
/// These are the only two labels a payroll run is keyed on. The employee
/// directory groups people by finer department codes; it is expected to
/// resolve each employee to one of these labels before listing them, and
/// department codes are not accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleGroup {
    /// Rank-and-file staff.
    Staff,
    /// Managers.
    Manager,
}

impl RoleGroup {
    /// Returns the role label as stored on payroll records.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::RoleGroup;
    ///
    /// assert_eq!(RoleGroup::Manager.label(), "Manager");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            RoleGroup::Staff => "Staff",
            RoleGroup::Manager => "Manager",
        }
    }
}

impl fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoleGroup {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Staff" => Ok(RoleGroup::Staff),
            "Manager" => Ok(RoleGroup::Manager),
            other => Err(EngineError::validation(
                "role",
                format!("'{}' is not one of: Staff, Manager", other),
            )),
        }
    }
}

/// An employee as listed by the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The payroll label the directory resolved the employee's department to.
    pub role: RoleGroup,
}
