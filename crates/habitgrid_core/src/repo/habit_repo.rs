//! Habit registry contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable create/rename/delete/list APIs over the `habits` table.
//! - Own the cascading log cleanup that runs inside habit deletion.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths normalize names via `normalize_habit_name` before SQL.
//! - Adding an already-existing name is a silent no-op returning the
//!   existing id, matching the `INSERT OR IGNORE` store contract.
//! - `delete_habit` removes the habit row and every log row referencing it
//!   in one transaction; no orphaned logs survive.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use crate::model::habit::{normalize_habit_name, Habit, HabitId, HabitValidationError};
use rusqlite::{params, Connection, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for habit/log persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    NotFound(HabitId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for habit registry operations.
pub trait HabitRepository {
    /// Inserts a habit by name, returning its id. Duplicate names are a
    /// silent no-op and yield the existing id.
    fn insert_habit(&self, name: &str) -> RepoResult<HabitId>;
    /// Renames a habit in place; existing logs are untouched.
    fn rename_habit(&self, id: HabitId, new_name: &str) -> RepoResult<()>;
    /// Deletes a habit and all of its logs atomically.
    fn delete_habit(&self, id: HabitId) -> RepoResult<()>;
    /// Lists all habits in insertion order.
    fn list_habits(&self) -> RepoResult<Vec<Habit>>;
    /// Returns whether a habit id references an existing habit.
    fn habit_exists(&self, id: HabitId) -> RepoResult<bool>;
}

/// SQLite-backed habit registry.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        ensure_table(conn, "habits", &["id", "name"])?;
        Ok(Self { conn })
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn insert_habit(&self, name: &str) -> RepoResult<HabitId> {
        let name = normalize_habit_name(name)?;

        self.conn.execute(
            "INSERT OR IGNORE INTO habits (name) VALUES (?1);",
            [name.as_str()],
        )?;

        // Re-query instead of last_insert_rowid: the ignored-duplicate path
        // leaves last_insert_rowid pointing at an unrelated row.
        let id = self.conn.query_row(
            "SELECT id FROM habits WHERE name = ?1;",
            [name.as_str()],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    fn rename_habit(&self, id: HabitId, new_name: &str) -> RepoResult<()> {
        let name = normalize_habit_name(new_name)?;

        let changed = self.conn.execute(
            "UPDATE habits SET name = ?1 WHERE id = ?2;",
            params![name.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        if !habit_exists_in_tx(&tx, id)? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute("DELETE FROM logs WHERE habit_id = ?1;", [id])?;
        tx.execute("DELETE FROM habits WHERE id = ?1;", [id])?;

        tx.commit()?;
        Ok(())
    }

    fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM habits ORDER BY id ASC;")?;

        let mut rows = stmt.query([])?;
        let mut habits = Vec::new();
        while let Some(row) = rows.next()? {
            habits.push(Habit {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }

        Ok(habits)
    }

    fn habit_exists(&self, id: HabitId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn habit_exists_in_tx(tx: &Transaction<'_>, id: HabitId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn ensure_table(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
