#![forbid(unsafe_code)]

//! Core domain model and generation engine for the Pillarplan system.
//!
//! This crate provides:
//! - Domain types (pillars, preferences, library records, generated programs)
//! - Duration estimation from free-text repetition specs
//! - Week theme progression and schedule templates
//! - Block generation and time-budget trimming
//! - Program assembly

pub mod types;
pub mod error;
pub mod estimates;
pub mod themes;
pub mod schedule;
pub mod blocks;
pub mod budget;
pub mod program;
pub mod catalog;
pub mod library;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use budget::{validate_time_budget, BudgetCheck};
pub use catalog::starter_library;
pub use config::Config;
pub use estimates::{estimate_block_minutes, estimate_rpe, format_duration};
pub use library::{load_library, resolve_library};
pub use program::{generate_program, generate_program_now};
