//! Error types for the calculator

use thiserror::Error;

use crate::email::EmailError;
use crate::inputs::ValidationErrors;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// A summary was requested from fewer years than its checkpoints need.
    #[error("Projection has {actual} years, summary needs at least {required}")]
    InsufficientRecords { required: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read exported table: {message}")]
    Parse { message: String },

    #[error("Email error: {0}")]
    Email(#[from] EmailError),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
