//! Workout grouping by local calendar day.

use super::month_grid::MonthGrid;
use crate::model::workout::Workout;
use chrono::{NaiveDate, TimeZone};
use log::warn;
use std::collections::BTreeMap;

/// One rendered grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub workout_count: usize,
}

/// Groups workouts by the day they were performed in `tz`.
///
/// Each bucket is ordered newest first. Workouts whose timestamp is outside
/// the representable range are skipped.
pub fn group_by_day<'w, Tz: TimeZone>(
    workouts: &'w [Workout],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'w Workout>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Workout>> = BTreeMap::new();
    for workout in workouts {
        let Some(local) = tz.timestamp_millis_opt(workout.performed_at).single() else {
            warn!(
                "event=group_by_day module=calendar status=skipped workout_id={}",
                workout.id
            );
            continue;
        };
        groups.entry(local.date_naive()).or_default().push(workout);
    }

    for bucket in groups.values_mut() {
        bucket.sort_by(|left, right| {
            right
                .performed_at
                .cmp(&left.performed_at)
                .then_with(|| left.id.cmp(&right.id))
        });
    }
    groups
}

/// Annotates every grid day with month membership and its group size.
pub fn day_cells<T>(grid: &MonthGrid, groups: &BTreeMap<NaiveDate, Vec<T>>) -> Vec<DayCell> {
    grid.days
        .iter()
        .map(|&date| DayCell {
            date,
            in_month: grid.is_in_month(date),
            workout_count: groups.get(&date).map_or(0, Vec::len),
        })
        .collect()
}
