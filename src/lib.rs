//! Savings Projection - deterministic 40-year savings and income calculator
//!
//! This library provides:
//! - Input validation that reports every offending field at once
//! - A projection engine with two growth models (monthly compound contribution
//!   and annual compounding with a savings percentage)
//! - Checkpoint summaries (years 10/30/40)
//! - CSV / tab-separated export and parse-back
//! - An email relay for sending results through SendGrid

pub mod error;
pub mod inputs;
pub mod projection;
pub mod export;
pub mod email;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalculatorError, Result};
pub use inputs::{GrowthModel, RawInputs, ValidatedInputs, FieldError, ValidationErrors, validate};
pub use projection::{project, summarize, ProjectionResult, Summary, YearRecord};
pub use export::{serialize, serialize_table, parse_table, ExportFormat, ExportOptions};
pub use scenario::{Calculation, ScenarioRunner};
