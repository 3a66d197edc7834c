//! Daily log model and the per-cell status cycle.
//!
//! # Responsibility
//! - Define the recorded status of one habit on one calendar day.
//! - Own the fixed toggle cycle driving every cell interaction.
//!
//! # Invariants
//! - A stored status is always `Done` or `Missed`; the untouched state is
//!   encoded by row absence and never persisted.
//! - `advance` is the only transition; there is no direct "set status".

use crate::model::habit::HabitId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion status stored for one habit on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    /// Habit was completed that day.
    Done,
    /// Habit was explicitly marked as missed.
    Missed,
}

impl LogStatus {
    /// Integer code used by the `logs.status` column.
    pub fn to_db(self) -> i64 {
        match self {
            Self::Done => 1,
            Self::Missed => 2,
        }
    }

    /// Parses the `logs.status` column code.
    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Done),
            2 => Some(Self::Missed),
            _ => None,
        }
    }
}

/// The recorded completion status of one habit on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub status: LogStatus,
}

/// Advances a cell through the fixed cycle `None -> Done -> Missed -> None`.
pub fn advance(current: Option<LogStatus>) -> Option<LogStatus> {
    match current {
        None => Some(LogStatus::Done),
        Some(LogStatus::Done) => Some(LogStatus::Missed),
        Some(LogStatus::Missed) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{advance, LogStatus};

    #[test]
    fn cycle_closes_after_three_steps() {
        let first = advance(None);
        let second = advance(first);
        let third = advance(second);

        assert_eq!(first, Some(LogStatus::Done));
        assert_eq!(second, Some(LogStatus::Missed));
        assert_eq!(third, None);
        assert_eq!(advance(third), Some(LogStatus::Done));
    }

    #[test]
    fn db_codes_match_schema_contract() {
        assert_eq!(LogStatus::Done.to_db(), 1);
        assert_eq!(LogStatus::Missed.to_db(), 2);
        assert_eq!(LogStatus::from_db(1), Some(LogStatus::Done));
        assert_eq!(LogStatus::from_db(2), Some(LogStatus::Missed));
        assert_eq!(LogStatus::from_db(0), None);
        assert_eq!(LogStatus::from_db(3), None);
    }
}
