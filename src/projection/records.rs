//! Output structures for projections

use serde::{Deserialize, Serialize};

use super::summary::{summarize, Summary};
use crate::error::Result;
use crate::inputs::{GrowthModel, ValidatedInputs};

/// A single year of projection output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Balance (or income) at the start of the year
    pub start_value: f64,

    /// Interest earned, or salary increase granted, during the year
    pub delta: f64,

    /// Balance (or income) at the end of the year
    pub end_value: f64,

    /// End balance / 12 (compound contribution) or monthly savings (annual compounding)
    pub monthly_equivalent: f64,

    /// Change over the year, including contributions
    pub period_increase: f64,

    /// Amount saved this year
    pub annual_savings: f64,

    /// Running total of `annual_savings` up to and including this year
    pub total_accumulated: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    inputs: ValidatedInputs,
    records: Vec<YearRecord>,
}

impl ProjectionResult {
    pub(crate) fn new(inputs: ValidatedInputs, capacity: usize) -> Self {
        Self {
            inputs,
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn add_record(&mut self, record: YearRecord) {
        self.records.push(record);
    }

    /// Inputs the projection was run with
    pub fn inputs(&self) -> &ValidatedInputs {
        &self.inputs
    }

    pub fn model(&self) -> GrowthModel {
        self.inputs.model()
    }

    /// Year records in order, year 1 first
    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    /// Record for a given projection year (1-indexed)
    pub fn record(&self, year: u32) -> Option<&YearRecord> {
        let index = year.checked_sub(1)? as usize;
        self.records.get(index)
    }

    /// Checkpoint summary over all records
    pub fn summary(&self) -> Result<Summary> {
        summarize(&self.records)
    }
}
