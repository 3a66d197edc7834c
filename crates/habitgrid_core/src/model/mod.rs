//! Domain model for habits and daily logs.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Centralize name validation and the per-cell status cycle.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId` assigned on creation.
//! - An untouched day has no stored record; absence encodes "no status".

pub mod habit;
pub mod log;
