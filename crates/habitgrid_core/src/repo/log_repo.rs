//! Log ledger contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide per-(habit, day) status persistence on top of the `logs` table.
//! - Own the toggle-cycle read-modify-write with atomic semantics.
//! - Provide the aggregate queries consumed by the stats engine.
//!
//! # Invariants
//! - Absence of a row encodes the untouched state; cycling back to it
//!   deletes the row instead of storing a sentinel.
//! - `cycle_status` verifies the habit exists and commits the full
//!   transition in one transaction.
//! - Dates are persisted as ISO-8601 `YYYY-MM-DD` text.

use crate::model::habit::HabitId;
use crate::model::log::{advance, LogEntry, LogStatus};
use crate::repo::habit_repo::{ensure_connection_ready, ensure_table, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction};

/// Filter options for counting log rows.
#[derive(Debug, Clone, Default)]
pub struct LogCountQuery {
    /// Optional status filter; `None` counts rows of any status.
    pub status: Option<LogStatus>,
    /// Optional restriction to one habit.
    pub habit_id: Option<HabitId>,
    /// Optional inclusive date range.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Done/total row counts over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTotals {
    pub done: u32,
    pub total: u32,
}

/// Repository interface for log ledger operations.
pub trait LogRepository {
    /// Returns the stored status for one cell, `None` when no row exists.
    /// An unknown habit id yields `None`; no log could exist for it.
    fn get_status(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<Option<LogStatus>>;
    /// Advances one cell through the fixed cycle and persists the result.
    /// Returns the new status. Fails with `NotFound` for an unknown habit.
    fn cycle_status(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<Option<LogStatus>>;
    /// Counts log rows matching the query filters.
    fn count_logs(&self, query: &LogCountQuery) -> RepoResult<u32>;
    /// Returns done/total row counts over all logs.
    fn status_totals(&self) -> RepoResult<StatusTotals>;
    /// Lists all log rows, ascending by date then habit id; the stats
    /// engine derives its weekly grouping from this full read.
    fn list_logs(&self) -> RepoResult<Vec<LogEntry>>;
}

/// SQLite-backed log ledger.
pub struct SqliteLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLogRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        ensure_table(conn, "habits", &["id", "name"])?;
        ensure_table(conn, "logs", &["habit_id", "log_date", "status"])?;
        Ok(Self { conn })
    }
}

impl LogRepository for SqliteLogRepository<'_> {
    fn get_status(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<Option<LogStatus>> {
        let mut stmt = self.conn.prepare(
            "SELECT status FROM logs WHERE habit_id = ?1 AND log_date = ?2;",
        )?;

        let mut rows = stmt.query(params![habit_id, date.to_string()])?;
        if let Some(row) = rows.next()? {
            let code: i64 = row.get("status")?;
            return Ok(Some(parse_status(code)?));
        }

        Ok(None)
    }

    fn cycle_status(&self, habit_id: HabitId, date: NaiveDate) -> RepoResult<Option<LogStatus>> {
        let date_text = date.to_string();
        let tx = self.conn.unchecked_transaction()?;
        if !habit_exists_in_tx(&tx, habit_id)? {
            return Err(RepoError::NotFound(habit_id));
        }

        let current = status_in_tx(&tx, habit_id, date_text.as_str())?;
        let next = advance(current);

        match next {
            None => {
                tx.execute(
                    "DELETE FROM logs WHERE habit_id = ?1 AND log_date = ?2;",
                    params![habit_id, date_text.as_str()],
                )?;
            }
            Some(status) => {
                tx.execute(
                    "INSERT OR REPLACE INTO logs (habit_id, log_date, status)
                     VALUES (?1, ?2, ?3);",
                    params![habit_id, date_text.as_str(), status.to_db()],
                )?;
            }
        }

        tx.commit()?;
        Ok(next)
    }

    fn count_logs(&self, query: &LogCountQuery) -> RepoResult<u32> {
        let mut sql = String::from("SELECT COUNT(*) FROM logs WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Integer(status.to_db()));
        }

        if let Some(habit_id) = query.habit_id {
            sql.push_str(" AND habit_id = ?");
            bind_values.push(Value::Integer(habit_id));
        }

        if let Some((from, to)) = query.date_range {
            sql.push_str(" AND log_date >= ? AND log_date <= ?");
            bind_values.push(Value::Text(from.to_string()));
            bind_values.push(Value::Text(to.to_string()));
        }

        let count: u32 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;

        Ok(count)
    }

    fn status_totals(&self) -> RepoResult<StatusTotals> {
        let (done, total) = self.conn.query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN status = ?1 THEN 1 ELSE 0 END), 0),
                COUNT(*)
             FROM logs;",
            [LogStatus::Done.to_db()],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;

        Ok(StatusTotals { done, total })
    }

    fn list_logs(&self) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, log_date, status
             FROM logs
             ORDER BY log_date ASC, habit_id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let date_text: String = row.get("log_date")?;
            let code: i64 = row.get("status")?;
            entries.push(LogEntry {
                habit_id: row.get("habit_id")?,
                date: parse_date(&date_text)?,
                status: parse_status(code)?,
            });
        }

        Ok(entries)
    }
}

fn parse_status(code: i64) -> RepoResult<LogStatus> {
    LogStatus::from_db(code).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status code `{code}` in logs.status"))
    })
}

fn parse_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{value}` in logs.log_date"))
    })
}

fn habit_exists_in_tx(tx: &Transaction<'_>, id: HabitId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn status_in_tx(
    tx: &Transaction<'_>,
    habit_id: HabitId,
    date_text: &str,
) -> RepoResult<Option<LogStatus>> {
    let mut stmt =
        tx.prepare("SELECT status FROM logs WHERE habit_id = ?1 AND log_date = ?2;")?;
    let mut rows = stmt.query(params![habit_id, date_text])?;
    if let Some(row) = rows.next()? {
        let code: i64 = row.get(0)?;
        return Ok(Some(parse_status(code)?));
    }
    Ok(None)
}
