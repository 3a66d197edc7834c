//! Habit registry use-case service.
//!
//! # Responsibility
//! - Provide stable add/rename/delete/list entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::habit::{Habit, HabitId};
use crate::repo::habit_repo::{HabitRepository, RepoResult};

/// Use-case service wrapper for habit registry operations.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a habit by name and returns its id.
    ///
    /// # Contract
    /// - The name is trimmed; blank input fails with a validation error.
    /// - Adding an existing name is a silent no-op returning the
    ///   existing id, so repeated submissions stay idempotent.
    pub fn add_habit(&self, name: &str) -> RepoResult<HabitId> {
        self.repo.insert_habit(name)
    }

    /// Renames a habit in place; its logs are untouched.
    pub fn rename_habit(&self, id: HabitId, new_name: &str) -> RepoResult<()> {
        self.repo.rename_habit(id, new_name)
    }

    /// Deletes a habit together with every log referencing it.
    pub fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        self.repo.delete_habit(id)
    }

    /// Lists all habits in insertion order. Empty means "no habits yet".
    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        self.repo.list_habits()
    }
}
