//! Scenario runner: validate, project and summarize in one step
//!
//! Every run starts from scratch; nothing is cached between calls, so one
//! runner can be shared freely across threads.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::inputs::{validate, RawInputs, ValidatedInputs};
use crate::projection::{project, ProjectionResult, Summary};

/// A full, valid calculation: year records plus their summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub result: ProjectionResult,
    pub summary: Summary,
}

impl Calculation {
    /// Project and summarize already validated inputs
    pub fn from_validated(inputs: &ValidatedInputs) -> Result<Self> {
        let result = project(inputs);
        let summary = result.summary()?;
        Ok(Self { result, summary })
    }
}

/// Runs calculations for one or many input sets
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let calculation = runner.run(&RawInputs::income("300000", "2", "1.2"))?;
/// println!("{:.2}", calculation.summary.total_savings);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Validate then project a single input set. Nothing is projected when
    /// validation fails.
    pub fn run(&self, raw: &RawInputs) -> Result<Calculation> {
        let inputs = validate(raw)?;
        Calculation::from_validated(&inputs)
    }

    /// Run many input sets in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[RawInputs]) -> Vec<Result<Calculation>> {
        let results: Vec<Result<Calculation>> = inputs.par_iter().map(|raw| self.run(raw)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            "Batch of {} scenarios complete ({} valid, {} rejected)",
            inputs.len(),
            inputs.len() - failed,
            failed
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Field;
    use crate::CalculatorError;

    #[test]
    fn test_run_valid_inputs() {
        let calculation = ScenarioRunner::new()
            .run(&RawInputs::interest("10000", "5", "0"))
            .unwrap();

        assert_eq!(calculation.result.records().len(), 40);
        assert_eq!(calculation.summary.years, 40);
        assert_eq!(calculation.summary.initial_value, 10_000.0);
    }

    #[test]
    fn test_run_invalid_inputs_reports_every_field() {
        let err = ScenarioRunner::new()
            .run(&RawInputs::income("-1", "200", "x"))
            .unwrap_err();

        match err {
            CalculatorError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(Field::ALL.iter().all(|f| errors.for_field(*f).is_some()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();
        let inputs: Vec<RawInputs> = ["3", "4", "5"]
            .iter()
            .map(|rate| RawInputs::interest("10000", *rate, "100"))
            .chain(std::iter::once(RawInputs::interest("10000", "-1", "100")))
            .collect();

        let results = runner.run_batch(&inputs);
        assert_eq!(results.len(), 4);
        assert!(results[3].is_err());

        // Higher rate should result in higher final value
        let finals: Vec<f64> = results[..3]
            .iter()
            .map(|r| r.as_ref().unwrap().summary.final_value)
            .collect();
        assert!(finals[2] > finals[1] && finals[1] > finals[0]);

        // Same answer as a sequential run
        let sequential = runner.run(&inputs[1]).unwrap();
        assert_eq!(results[1].as_ref().unwrap(), &sequential);
    }
}
