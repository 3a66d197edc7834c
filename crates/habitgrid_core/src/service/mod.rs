//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod dashboard_service;
pub mod habit_service;
pub mod log_service;
