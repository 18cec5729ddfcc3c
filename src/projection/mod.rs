//! Projection engine, year records and checkpoint summaries

mod state;
mod engine;
mod records;
mod summary;

pub use state::ProjectionState;
pub use engine::{project, MONTHS_PER_YEAR, PROJECTION_YEARS};
pub use records::{ProjectionResult, YearRecord};
pub use summary::{summarize, Checkpoint, Summary, CHECKPOINT_YEARS};
