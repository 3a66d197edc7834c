//! Week window computation and the weekly grid read model.

use crate::model::habit::Habit;
use crate::model::log::LogStatus;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in one grid window.
pub const WEEK_DAYS: usize = 7;

/// One habit row of the weekly grid, cells ordered by window date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub habit: Habit,
    /// Cell per window day; `None` means the day was never logged.
    pub cells: [Option<LogStatus>; WEEK_DAYS],
}

/// The weekly grid: 7 Monday-aligned dates plus one row per habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub dates: [NaiveDate; WEEK_DAYS],
    pub rows: Vec<GridRow>,
}

impl WeekGrid {
    /// Returns whether there are no habit rows to render.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes the 7 Monday-aligned dates for the given week offset.
///
/// Offset 0 is the week containing `today`, negative offsets are past
/// weeks, positive are future. Pure function of its inputs; the caller
/// (presentation session) owns the current offset.
///
/// Returns `None` when the offset would leave the representable date
/// range, so bad input stays a recoverable condition for callers.
pub fn week_window(today: NaiveDate, week_offset: i64) -> Option<[NaiveDate; WEEK_DAYS]> {
    let base_day = today.checked_add_signed(Duration::try_weeks(week_offset)?)?;
    let start_of_week = base_day.checked_sub_signed(Duration::days(i64::from(
        base_day.weekday().num_days_from_monday(),
    )))?;
    // The whole window must fit; checking the last day covers the rest.
    start_of_week.checked_add_signed(Duration::days(6))?;
    Some(std::array::from_fn(|offset| {
        start_of_week + Duration::days(offset as i64)
    }))
}
