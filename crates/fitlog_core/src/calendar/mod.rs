//! Calendar layout helpers for the monthly workout view.
//!
//! # Responsibility
//! - Lay out a month as whole 7-day weeks aligned to the configured first weekday.
//! - Group workouts into local calendar days for the day-cell indicators.
//!
//! # Invariants
//! - Grid output is a pure function of the anchor date and `CalendarConfig`.
//! - Nothing here is cached; callers rebuild when configuration changes.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod day_groups;
pub mod month_grid;

const DEFAULT_WEEKDAY_SYMBOLS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// First weekday must be in `1..=7` (1 = Sunday).
    InvalidFirstWeekday(u8),
    /// The month containing this date, or an adjacent filler day, is outside
    /// the representable date range.
    MonthOutOfRange(NaiveDate),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFirstWeekday(value) => {
                write!(f, "first weekday must be in 1..=7, got {value}")
            }
            Self::MonthOutOfRange(anchor) => {
                write!(f, "cannot resolve month interval for {anchor}")
            }
        }
    }
}

impl Error for CalendarError {}

/// Gregorian calendar settings that affect grid layout.
///
/// Weekdays are numbered 1 = Sunday through 7 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    first_weekday: u8,
    /// Canonical order, starting at Sunday.
    weekday_symbols: [String; 7],
}

impl CalendarConfig {
    pub fn new(first_weekday: u8) -> Result<Self, CalendarError> {
        if !(1..=7).contains(&first_weekday) {
            return Err(CalendarError::InvalidFirstWeekday(first_weekday));
        }
        Ok(Self {
            first_weekday,
            weekday_symbols: DEFAULT_WEEKDAY_SYMBOLS.map(str::to_string),
        })
    }

    pub fn sunday_first() -> Self {
        Self {
            first_weekday: 1,
            weekday_symbols: DEFAULT_WEEKDAY_SYMBOLS.map(str::to_string),
        }
    }

    pub fn monday_first() -> Self {
        Self {
            first_weekday: 2,
            ..Self::sunday_first()
        }
    }

    /// Replaces the locale weekday symbols; `symbols[0]` must be Sunday.
    pub fn with_weekday_symbols(mut self, symbols: [String; 7]) -> Self {
        self.weekday_symbols = symbols;
        self
    }

    pub fn first_weekday(&self) -> u8 {
        self.first_weekday
    }

    pub fn weekday_symbols(&self) -> &[String; 7] {
        &self.weekday_symbols
    }

    /// Weekday number of `date` in this calendar's numbering (1 = Sunday).
    pub fn weekday_number(&self, date: NaiveDate) -> u8 {
        // number_from_sunday is always in 1..=7.
        date.weekday().number_from_sunday() as u8
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::sunday_first()
    }
}

/// Returns whether both dates fall in the same calendar month.
pub fn is_same_month(left: NaiveDate, right: NaiveDate) -> bool {
    left.year() == right.year() && left.month() == right.month()
}
