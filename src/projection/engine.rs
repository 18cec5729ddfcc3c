//! Core projection engine for yearly savings and income projections

use log::debug;

use crate::inputs::{GrowthModel, ValidatedInputs};
use super::records::{ProjectionResult, YearRecord};
use super::state::ProjectionState;

/// Number of years every projection covers
pub const PROJECTION_YEARS: u32 = 40;

/// Sub-periods per year for the compound contribution model
pub const MONTHS_PER_YEAR: u32 = 12;

/// Run the full projection for validated inputs.
///
/// Always produces exactly [`PROJECTION_YEARS`] records numbered from 1, where
/// each year's start value is the previous year's end value. Values are never
/// rounded here.
pub fn project(inputs: &ValidatedInputs) -> ProjectionResult {
    let mut result = ProjectionResult::new(*inputs, PROJECTION_YEARS as usize);
    let mut state = ProjectionState::from_inputs(inputs);

    for _year in 1..=PROJECTION_YEARS {
        state.advance_year();

        let record = match inputs.model() {
            GrowthModel::CompoundContribution => compound_contribution_year(inputs, &state),
            GrowthModel::AnnualCompounding => annual_compounding_year(inputs, &state),
        };

        state.close_year(&record);
        result.add_record(record);
    }

    debug!(
        "Projected {} years ({}): {:.2} -> {:.2}",
        PROJECTION_YEARS,
        inputs.model().as_str(),
        inputs.principal(),
        state.balance,
    );

    result
}

/// One year of the interest calculator.
///
/// Each month the contribution is added first, then interest accrues at
/// `rate / 100 / 12` on the updated balance.
fn compound_contribution_year(inputs: &ValidatedInputs, state: &ProjectionState) -> YearRecord {
    let monthly_rate = inputs.rate() / 100.0 / MONTHS_PER_YEAR as f64;
    let contribution = inputs.contribution();

    let start_value = state.balance;
    let mut balance = start_value;
    let mut interest = 0.0;

    for _month in 1..=MONTHS_PER_YEAR {
        balance += contribution;
        let accrued = balance * monthly_rate;
        interest += accrued;
        balance += accrued;
    }

    let annual_savings = contribution * MONTHS_PER_YEAR as f64;

    YearRecord {
        year: state.year,
        start_value,
        delta: interest,
        end_value: balance,
        monthly_equivalent: balance / MONTHS_PER_YEAR as f64,
        period_increase: balance - start_value,
        annual_savings,
        total_accumulated: state.cumulative_savings + annual_savings,
    }
}

/// One year of the church tax calculator.
///
/// The income earned during the year is the start value; the raise is granted
/// at year end and becomes next year's income. Savings are a percentage of the
/// income earned.
fn annual_compounding_year(inputs: &ValidatedInputs, state: &ProjectionState) -> YearRecord {
    let start_value = state.balance;
    let delta = start_value * inputs.rate() / 100.0;
    let end_value = start_value + delta;

    let annual_savings = start_value * inputs.contribution() / 100.0;

    YearRecord {
        year: state.year,
        start_value,
        delta,
        end_value,
        monthly_equivalent: annual_savings / MONTHS_PER_YEAR as f64,
        period_increase: delta,
        annual_savings,
        total_accumulated: state.cumulative_savings + annual_savings,
    }
}
