//! Checkpoint summary derived from a full projection

use serde::Serialize;

use super::records::YearRecord;
use crate::error::{CalculatorError, Result};

/// Years at which cumulative values are reported
pub const CHECKPOINT_YEARS: [u32; 3] = [10, 30, 40];

/// Values at a checkpoint year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Checkpoint {
    pub year: u32,
    pub end_value: f64,
    pub total_accumulated: f64,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of years summarized
    pub years: u32,
    /// Start value of year 1
    pub initial_value: f64,
    /// End value of the last year
    pub final_value: f64,
    /// Start value of the last year (the final income on the church tax table)
    pub final_period_value: f64,
    /// Sum of yearly interest / salary increases
    pub total_delta: f64,
    /// Accumulated savings at the end of the last year
    pub total_savings: f64,
    /// `final_value - initial_value`
    pub growth: f64,
    /// Growth relative to the initial value, in percent. 0 when the initial value is 0.
    pub growth_percent: f64,
    pub checkpoints: Vec<Checkpoint>,
}

impl Summary {
    /// Checkpoint for a given year, if it is one of [`CHECKPOINT_YEARS`]
    pub fn checkpoint(&self, year: u32) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.year == year)
    }
}

/// Derive the summary from a full sequence of year records.
///
/// Fails when the records do not reach the last checkpoint year.
pub fn summarize(records: &[YearRecord]) -> Result<Summary> {
    let required = CHECKPOINT_YEARS.iter().copied().max().unwrap_or(0) as usize;

    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) if records.len() >= required => (first, last),
        _ => {
            return Err(CalculatorError::InsufficientRecords {
                required,
                actual: records.len(),
            })
        }
    };

    let checkpoints = CHECKPOINT_YEARS
        .iter()
        .map(|&year| {
            records
                .iter()
                .find(|r| r.year == year)
                .map(|r| Checkpoint {
                    year,
                    end_value: r.end_value,
                    total_accumulated: r.total_accumulated,
                })
                .ok_or(CalculatorError::InsufficientRecords {
                    required,
                    actual: records.len(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let initial_value = first.start_value;
    let final_value = last.end_value;
    let growth = final_value - initial_value;
    let growth_percent = if initial_value > 0.0 {
        growth / initial_value * 100.0
    } else {
        0.0
    };

    Ok(Summary {
        years: records.len() as u32,
        initial_value,
        final_value,
        final_period_value: last.start_value,
        total_delta: records.iter().map(|r| r.delta).sum(),
        total_savings: last.total_accumulated,
        growth,
        growth_percent,
        checkpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{GrowthModel, ValidatedInputs};
    use crate::projection::project;
    use approx::assert_relative_eq;

    fn run(model: GrowthModel, principal: f64, rate: f64, contribution: f64) -> Vec<YearRecord> {
        let inputs = ValidatedInputs::new(model, principal, rate, contribution).unwrap();
        project(&inputs).records().to_vec()
    }

    #[test]
    fn test_interest_summary() {
        let records = run(GrowthModel::AnnualCompounding, 10_000.0, 5.0, 0.0);
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.years, 40);
        assert_relative_eq!(summary.initial_value, 10_000.0);
        assert_relative_eq!(summary.final_value, records[39].end_value);
        assert_relative_eq!(summary.growth, records[39].end_value - 10_000.0);
        assert_relative_eq!(
            summary.growth_percent,
            (1.05_f64.powi(40) - 1.0) * 100.0,
            max_relative = 1e-10
        );
        assert_relative_eq!(summary.total_delta, summary.growth, max_relative = 1e-10);

        let tenth = summary.checkpoint(10).unwrap();
        assert_relative_eq!(tenth.end_value, 10_000.0 * 1.05_f64.powi(10), max_relative = 1e-12);
        assert!(summary.checkpoint(20).is_none());
    }

    #[test]
    fn test_income_summary_uses_table_values() {
        let records = run(GrowthModel::AnnualCompounding, 300_000.0, 2.0, 1.2);
        let summary = summarize(&records).unwrap();

        assert_relative_eq!(summary.final_period_value, records[39].start_value);
        assert_relative_eq!(summary.total_savings, records[39].total_accumulated);
        assert_relative_eq!(
            summary.checkpoint(30).unwrap().total_accumulated,
            records[29].total_accumulated
        );
    }

    #[test]
    fn test_zero_principal_growth_percent_is_zero() {
        let records = run(GrowthModel::CompoundContribution, 0.0, 5.0, 100.0);
        let summary = summarize(&records).unwrap();

        assert!(summary.growth > 0.0);
        assert_eq!(summary.growth_percent, 0.0);
        assert!(summary.growth_percent.is_finite());
    }

    #[test]
    fn test_too_few_records_is_an_error() {
        let records = run(GrowthModel::CompoundContribution, 1_000.0, 5.0, 0.0);

        match summarize(&records[..39]) {
            Err(CalculatorError::InsufficientRecords { required, actual }) => {
                assert_eq!(required, 40);
                assert_eq!(actual, 39);
            }
            other => panic!("expected InsufficientRecords, got {:?}", other),
        }
        assert!(summarize(&[]).is_err());
    }
}
