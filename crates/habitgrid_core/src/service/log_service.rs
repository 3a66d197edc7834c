//! Log ledger use-case service.
//!
//! # Responsibility
//! - Provide the cell toggle primitive and status lookups for callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Every status change goes through the fixed cycle; there is no
//!   direct "set status" entry point.

use crate::model::habit::HabitId;
use crate::model::log::LogStatus;
use crate::repo::habit_repo::RepoResult;
use crate::repo::log_repo::{LogCountQuery, LogRepository};
use chrono::NaiveDate;

/// Use-case service wrapper for log ledger operations.
pub struct LogService<R: LogRepository> {
    repo: R,
}

impl<R: LogRepository> LogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the stored status of one cell, `None` for a never-logged day.
    pub fn status(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<Option<LogStatus>> {
        self.repo.get_status(habit_id, date)
    }

    /// Advances one cell through `None -> Done -> Missed -> None`.
    ///
    /// Returns the new status so the caller can refresh exactly the
    /// affected cell. Fails with `NotFound` for an unknown habit id.
    pub fn cycle_status(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> RepoResult<Option<LogStatus>> {
        self.repo.cycle_status(habit_id, date)
    }

    /// Counts log rows matching the query filters.
    pub fn count_logs(&self, query: &LogCountQuery) -> RepoResult<u32> {
        self.repo.count_logs(query)
    }
}
