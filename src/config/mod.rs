//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads versioned statutory rate schedules (work-month
//! assumptions, SSS, PhilHealth, Pag-IBIG and withholding-tax brackets)
//! from YAML files. Each schedule carries the date it takes effect from.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ph_statutory").unwrap();
//! println!("Loaded schedules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketGap, PagIbigRates, PhilHealthRates, RateSchedule, ScheduleMetadata, SssRates,
    StatutoryConfig, TaxBracket, WithholdingTaxTable, WorkMonth,
};
