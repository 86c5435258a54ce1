//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! rate schedules from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{RateSchedule, ScheduleMetadata, StatutoryConfig};

/// Loads and provides access to statutory rate schedules.
///
/// # Directory Structure
///
/// ```text
/// config/ph_statutory/
/// ├── schedule.yaml        # Jurisdiction metadata
/// └── rates/
///     └── 2026-01-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ph_statutory").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let schedule = loader.schedule_on(date).unwrap();
/// println!("SSS employee rate: {}", schedule.sss.employee_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if a required file is missing, contains invalid YAML, or holds a
    /// rate schedule that cannot drive a computation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let schedules = Self::load_schedules(&path.join("rates"))?;

        Ok(Self {
            config: StatutoryConfig::new(metadata, schedules),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StatutoryConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_schedules(rates_dir: &Path) -> EngineResult<Vec<RateSchedule>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let schedule = Self::load_yaml::<RateSchedule>(&path)?;
            schedule
                .validate()
                .map_err(|message| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message,
                })?;

            for gap in schedule.withholding_tax.boundary_gaps() {
                if gap.gap.is_sign_negative() {
                    warn!(
                        effective_date = %schedule.effective_date,
                        threshold = %gap.threshold,
                        gap = %gap.gap,
                        "Withholding tax drops across bracket boundary"
                    );
                } else {
                    debug!(
                        effective_date = %schedule.effective_date,
                        threshold = %gap.threshold,
                        gap = %gap.gap,
                        "Withholding tax jumps across bracket boundary"
                    );
                }
            }

            schedules.push(schedule);
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the schedule set metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }

    /// Gets the rate schedule in force on `date`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/ph_statutory")?;
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    /// let schedule = loader.schedule_on(date)?;
    /// println!("Schedule: {}", schedule.label);
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn schedule_on(&self, date: NaiveDate) -> EngineResult<&RateSchedule> {
        self.config
            .schedule_on(date)
            .ok_or(EngineError::RateScheduleNotFound { date })
    }
}
