//! Date values carried by dated entities.
//!
//! Parsing and localization of dates happen outside the core; these are
//! plain values the importer fills in and the renderer formats.

use serde::{Deserialize, Serialize};

/// Possibly incomplete calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    /// Date known only to the year.
    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
            day: None,
        }
    }

    /// Whether year, month and day are all known.
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
}

/// Range with optional open ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }
}

/// Either a single date or a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datey {
    Date(Date),
    Range(DateRange),
}

impl From<Date> for Datey {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<DateRange> for Datey {
    fn from(value: DateRange) -> Self {
        Self::Range(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Date;

    #[test]
    fn completeness_requires_all_parts() {
        assert!(Date::new(1901, 2, 3).is_complete());
        assert!(!Date::year(1901).is_complete());
        assert!(!Date::default().is_complete());
    }
}
