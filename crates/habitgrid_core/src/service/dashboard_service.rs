//! Dashboard use-case service: weekly grid and aggregate statistics.
//!
//! # Responsibility
//! - Assemble the weekly grid from the habit registry and log ledger.
//! - Derive the overall completion percent and per-week done counts.
//!
//! # Invariants
//! - Grid assembly never mutates; refresh happens by re-querying.
//! - Zero logged rows yields a 0 percent, never a division error.
//! - Weekly counts are sparse: weeks without a done row are absent.

use crate::calendar::week::{GridRow, WeekGrid, WEEK_DAYS};
use crate::model::log::LogStatus;
use crate::repo::habit_repo::{HabitRepository, RepoResult};
use crate::repo::log_repo::LogRepository;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Read-side service backing the dashboard view.
pub struct DashboardService<H: HabitRepository, L: LogRepository> {
    habits: H,
    logs: L,
}

impl<H: HabitRepository, L: LogRepository> DashboardService<H, L> {
    /// Creates a service over the two repositories it reads from.
    pub fn new(habits: H, logs: L) -> Self {
        Self { habits, logs }
    }

    /// Builds the grid for the given window dates (see `week_window`).
    ///
    /// An empty `rows` vector signals "no habits yet" to the renderer.
    pub fn build_grid(&self, dates: [NaiveDate; WEEK_DAYS]) -> RepoResult<WeekGrid> {
        let mut rows = Vec::new();

        for habit in self.habits.list_habits()? {
            let mut cells = [None; WEEK_DAYS];
            for (cell, date) in cells.iter_mut().zip(dates.iter()) {
                *cell = self.logs.get_status(habit.id, *date)?;
            }
            rows.push(GridRow { habit, cells });
        }

        Ok(WeekGrid { dates, rows })
    }

    /// Share of done rows among all logged rows, rounded to 2 decimals.
    ///
    /// Defined as 0 when nothing has been logged yet.
    pub fn overall_completion_percent(&self) -> RepoResult<f64> {
        let totals = self.logs.status_totals()?;
        if totals.total == 0 {
            return Ok(0.0);
        }
        Ok(round_percent(
            100.0 * f64::from(totals.done) / f64::from(totals.total),
        ))
    }

    /// Count of done rows per ISO calendar week number.
    ///
    /// Reads the whole ledger and keeps only done rows, the same full
    /// scan the weekly chart is fed from.
    pub fn weekly_completion_counts(&self) -> RepoResult<BTreeMap<u32, u32>> {
        let entries = self.logs.list_logs()?;
        Ok(group_by_iso_week(
            entries
                .into_iter()
                .filter(|entry| entry.status == LogStatus::Done)
                .map(|entry| entry.date),
        ))
    }
}

/// Rounds a percentage to two decimal places.
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn group_by_iso_week(dates: impl IntoIterator<Item = NaiveDate>) -> BTreeMap<u32, u32> {
    let mut counts = BTreeMap::new();
    for date in dates {
        *counts.entry(date.iso_week().week()).or_insert(0) += 1;
    }
    counts
}
