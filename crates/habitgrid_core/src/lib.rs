//! Core domain logic for HabitGrid.
//! This crate is the single source of truth for business invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::week::{week_window, GridRow, WeekGrid, WEEK_DAYS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{normalize_habit_name, Habit, HabitId, HabitValidationError};
pub use model::log::{advance, LogEntry, LogStatus};
pub use repo::habit_repo::{HabitRepository, RepoError, RepoResult, SqliteHabitRepository};
pub use repo::log_repo::{LogCountQuery, LogRepository, SqliteLogRepository, StatusTotals};
pub use service::dashboard_service::DashboardService;
pub use service::habit_service::HabitService;
pub use service::log_service::LogService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
