#![forbid(unsafe_code)]

//! Core derivation and tracking engine for the personalized meal planner.
//!
//! This crate provides:
//! - Domain types (biometric input, meal slots, progress entries)
//! - Metrics calculator (BMI, BMR, calorie target)
//! - Meal catalog and condition-driven rule engine
//! - Append-only progress ledger with time-series view
//! - Persistence adapters (JSONL log, CSV export, saved profile)

pub mod types;
pub mod error;
pub mod metrics;
pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod config;
pub mod logging;
pub mod wal;
pub mod export;
pub mod profile;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use metrics::{classify_bmi, compute_bmi, compute_bmr, compute_calorie_target};
pub use catalog::{build_default_catalog, get_default_catalog};
pub use engine::build_meal_plan;
pub use ledger::ProgressLedger;
pub use config::Config;
pub use wal::{EntrySink, JsonlSink};
pub use export::export_csv;
