//! Running state carried from one projection year to the next

use crate::inputs::ValidatedInputs;
use super::records::YearRecord;

/// State at a year boundary during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (0 before the first year starts)
    pub year: u32,

    /// Balance (or income) carried into the current year
    pub balance: f64,

    /// Savings accumulated over all completed years
    pub cumulative_savings: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn from_inputs(inputs: &ValidatedInputs) -> Self {
        Self {
            year: 0,
            balance: inputs.principal(),
            cumulative_savings: 0.0,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Carry a finished year's closing values into the next year
    pub fn close_year(&mut self, record: &YearRecord) {
        self.balance = record.end_value;
        self.cumulative_savings = record.total_accumulated;
    }
}
