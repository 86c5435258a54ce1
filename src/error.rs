//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a payroll operation can report to its caller.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// Every kind is terminal for the operation that raised it; the engine never
/// retries internally.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmptyPopulation {
///     role: "Manager".to_string(),
/// };
/// assert_eq!(error.to_string(), "No employees found with the role: Manager");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input field was malformed or out of range.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The selected role group resolved to zero employees.
    #[error("No employees found with the role: {role}")]
    EmptyPopulation {
        /// The role label that was requested.
        role: String,
    },

    /// The batch write of a payroll run failed and was rolled back.
    #[error("Payroll could not be saved: {message}")]
    PersistenceFailure {
        /// A caller-safe description of the failure.
        message: String,
    },

    /// No payroll record exists with the given id.
    #[error("Payroll record not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate schedule is in force on the requested date.
    #[error("No statutory rate schedule in force on {date}")]
    RateScheduleNotFound {
        /// The run date for which a schedule was requested.
        date: NaiveDate,
    },
}

impl EngineError {
    /// Creates a validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
