//! Calendar arithmetic for the weekly view.
//!
//! # Responsibility
//! - Compute Monday-aligned week windows as pure date arithmetic.
//! - Define the grid read model rendered by presentation layers.
//!
//! # Invariants
//! - A week window always spans exactly 7 consecutive days starting on
//!   Monday, regardless of which week is viewed.

pub mod week;
