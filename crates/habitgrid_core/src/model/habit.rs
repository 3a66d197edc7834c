//! Habit domain model.
//!
//! # Responsibility
//! - Define the habit record tracked per calendar day.
//! - Own habit-name normalization used by all write paths.
//!
//! # Invariants
//! - `id` is the store-assigned rowid and never changes after creation.
//! - Persisted names are trimmed, non-empty and unique (case-sensitive).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = i64;

/// A user-defined recurring activity tracked per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Store-assigned rowid, immutable for the habit lifetime.
    pub id: HabitId,
    /// Trimmed display name, unique across all habits.
    pub name: String,
}

/// Validation failure for habit name input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Name was empty or whitespace-only after trimming.
    EmptyName,
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
        }
    }
}

impl Error for HabitValidationError {}

/// Trims a habit name and rejects blank input.
///
/// # Contract
/// - Every write path must route names through here, so readers can rely
///   on persisted names being trimmed and non-empty.
pub fn normalize_habit_name(name: &str) -> Result<String, HabitValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
