//! Holiday calendar entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest accepted holiday name.
pub const MAX_HOLIDAY_NAME_LEN: usize = 255;

/// Kind of holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayType {
    /// Regular holiday.
    Normal,
    /// Special non-working day.
    Special,
}

/// A holiday to be added to the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHoliday {
    /// The calendar date.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Regular or special.
    pub holiday_type: HolidayType,
    /// Pay multiplier for work on this day (e.g. 2.00 for 200%).
    pub premium_rate: Decimal,
}

impl NewHoliday {
    /// Checks the name and premium rate.
    ///
    /// Date uniqueness is checked by the holiday store.
    pub fn validate(&self) -> EngineResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("name", "is required"));
        }
        if name.chars().count() > MAX_HOLIDAY_NAME_LEN {
            return Err(EngineError::validation(
                "name",
                format!("must not exceed {} characters", MAX_HOLIDAY_NAME_LEN),
            ));
        }
        if self.premium_rate < Decimal::ONE {
            return Err(EngineError::validation(
                "premium_rate",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A stored holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    /// Store-assigned identifier.
    pub id: u64,
    /// The calendar date.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Regular or special.
    pub holiday_type: HolidayType,
    /// Pay multiplier for work on this day.
    pub premium_rate: Decimal,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dec;

    fn independence_day() -> NewHoliday {
        NewHoliday {
            date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            name: "Independence Day".to_string(),
            holiday_type: HolidayType::Normal,
            premium_rate: dec("2.00"),
        }
    }

    #[test]
    fn test_valid_holiday() {
        assert!(independence_day().validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut holiday = independence_day();
        holiday.name = "   ".to_string();
        match holiday.validate() {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_long_name_is_rejected() {
        let mut holiday = independence_day();
        holiday.name = "x".repeat(256);
        assert!(holiday.validate().is_err());

        holiday.name = "x".repeat(255);
        assert!(holiday.validate().is_ok());
    }

    #[test]
    fn test_premium_below_one_is_rejected() {
        let mut holiday = independence_day();
        holiday.premium_rate = dec("0.99");
        match holiday.validate() {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "premium_rate"),
            other => panic!("Expected Validation error, got {:?}", other),
        }

        holiday.premium_rate = dec("1");
        assert!(holiday.validate().is_ok());
    }

    #[test]
    fn test_deserialize_holiday_type() {
        let json = r#"{
            "date": "2026-08-21",
            "name": "Ninoy Aquino Day",
            "holiday_type": "Special",
            "premium_rate": "1.30"
        }"#;
        let holiday: NewHoliday = serde_json::from_str(json).unwrap();
        assert_eq!(holiday.holiday_type, HolidayType::Special);
        assert_eq!(holiday.premium_rate, dec("1.30"));
    }
}
