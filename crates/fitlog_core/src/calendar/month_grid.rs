//! Month grid layout.
//!
//! # Invariants
//! - `days.len() % 7 == 0`.
//! - `days` is strictly ascending by one day per cell.
//! - Every date of the anchor month appears exactly once.
//! - Filler days come only from the adjacent months.

use super::{is_same_month, CalendarConfig, CalendarError};
use chrono::{Datelike, Days, Months, NaiveDate};
use log::warn;

const DAYS_PER_WEEK: usize = 7;

/// A month laid out as whole weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the anchor month.
    pub month_start: NaiveDate,
    /// Number of filler days before `month_start`.
    pub leading_filler: usize,
    /// All cells in display order.
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `anchor`.
    pub fn build(anchor: NaiveDate, calendar: &CalendarConfig) -> Result<Self, CalendarError> {
        let out_of_range = || CalendarError::MonthOutOfRange(anchor);

        let month_start = anchor.with_day(1).ok_or_else(out_of_range)?;
        let next_month_start = month_start
            .checked_add_months(Months::new(1))
            .ok_or_else(out_of_range)?;
        let days_in_month = (next_month_start - month_start).num_days() as usize;

        let leading_filler =
            leading_filler_count(calendar.weekday_number(month_start), calendar.first_weekday());

        let mut days = Vec::with_capacity(6 * DAYS_PER_WEEK);
        for offset in (1..=leading_filler).rev() {
            let day = month_start
                .checked_sub_days(Days::new(offset as u64))
                .ok_or_else(out_of_range)?;
            days.push(day);
        }

        days.extend(month_start.iter_days().take(days_in_month));

        while days.len() % DAYS_PER_WEEK != 0 {
            let next = days
                .last()
                .and_then(|last| last.succ_opt())
                .ok_or_else(out_of_range)?;
            days.push(next);
        }

        Ok(Self {
            month_start,
            leading_filler,
            days,
        })
    }

    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        is_same_month(date, self.month_start)
    }

    /// Grid rows, each exactly seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

/// Builds the ordered day cells for the month containing `anchor`.
///
/// Returns an empty grid, logged as a warning, when the month cannot be
/// resolved.
pub fn build_month_grid(anchor: NaiveDate, calendar: &CalendarConfig) -> Vec<NaiveDate> {
    match MonthGrid::build(anchor, calendar) {
        Ok(grid) => grid.days,
        Err(err) => {
            warn!(
                "event=month_grid_build module=calendar status=degraded first_weekday={} error={}",
                calendar.first_weekday(),
                err
            );
            Vec::new()
        }
    }
}

/// Filler cells needed before day 1 so column 0 is `first_weekday`.
///
/// Both arguments use 1 = Sunday numbering and are taken modulo 7.
pub fn leading_filler_count(weekday_of_first: u8, first_weekday: u8) -> usize {
    let weekday_of_first = u16::from(weekday_of_first) % 7;
    let first_weekday = u16::from(first_weekday) % 7;
    usize::from((weekday_of_first + 7 - first_weekday) % 7)
}

/// Header symbols rotated so they line up with the grid columns.
pub fn weekday_symbols(calendar: &CalendarConfig) -> Vec<String> {
    let shift = usize::from((calendar.first_weekday() - 1) % 7);
    let symbols = calendar.weekday_symbols();
    symbols[shift..]
        .iter()
        .chain(symbols[..shift].iter())
        .cloned()
        .collect()
}

/// Moves `anchor` by `delta` months, clamping the day to the target month.
///
/// Returns `None` when the result is outside the representable range.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        anchor.checked_add_months(months)
    } else {
        anchor.checked_sub_months(months)
    }
}
