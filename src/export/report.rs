//! Full export document and email text
//!
//! Document layout:
//! ```text
//! # Church Tax Calculation Export
//! # Generated: 2026-01-31 12:00:00      (only when a timestamp is given)
//! # Annual Income,300000
//! # Salary Increase %,2
//! # Savings %,1.2
//! Year,Income,Salary Increase,Annual Savings,Monthly Savings,Total Accumulated
//! 1,300000.00,6000.00,3600.00,300.00,3600.00
//! ...
//!
//! Summary
//! Total Savings after 10 years,39419.00
//! ...
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use csv::{Terminator, WriterBuilder};

use super::display::{format_currency, format_percent};
use super::table::{finish, format_amount, serialize_table, ExportFormat};
use crate::error::Result;
use crate::inputs::{GrowthModel, ValidatedInputs};
use crate::projection::{ProjectionResult, Summary, CHECKPOINT_YEARS};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for the full export document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Written to a `# Generated:` comment line when set
    pub generated_at: Option<NaiveDateTime>,
    /// Append the summary section after the table
    pub include_summary: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            generated_at: None,
            include_summary: true,
        }
    }
}

/// One labelled summary figure
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: String,
    pub value: f64,
    pub is_percent: bool,
}

impl SummaryLine {
    fn amount(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, is_percent: false }
    }

    fn percent(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, is_percent: true }
    }

    /// Value formatted for display
    pub fn display_value(&self) -> String {
        if self.is_percent {
            format_percent(self.value)
        } else {
            format_currency(self.value)
        }
    }
}

/// Document title for a model
pub fn title(model: GrowthModel) -> &'static str {
    match model {
        GrowthModel::CompoundContribution => "Interest Calculation",
        GrowthModel::AnnualCompounding => "Church Tax Calculation",
    }
}

/// Dated download name, e.g. `church-tax-calculation-2026-01-31.csv`
pub fn default_file_name(model: GrowthModel, date: NaiveDate, format: ExportFormat) -> String {
    let stem = match model {
        GrowthModel::CompoundContribution => "interest_calculator_",
        GrowthModel::AnnualCompounding => "church-tax-calculation-",
    };
    format!("{}{}.{}", stem, date.format("%Y-%m-%d"), format.extension())
}

/// Input settings as `(label, value)` pairs
pub fn settings(inputs: &ValidatedInputs) -> [(&'static str, f64); 3] {
    match inputs.model() {
        GrowthModel::CompoundContribution => [
            ("Start Amount", inputs.principal()),
            ("Interest Rate %", inputs.rate()),
            ("Monthly Savings", inputs.contribution()),
        ],
        GrowthModel::AnnualCompounding => [
            ("Annual Income", inputs.principal()),
            ("Salary Increase %", inputs.rate()),
            ("Savings %", inputs.contribution()),
        ],
    }
}

/// Headline figures reported for a model
pub fn summary_lines(model: GrowthModel, summary: &Summary) -> Vec<SummaryLine> {
    let mut lines = Vec::with_capacity(CHECKPOINT_YEARS.len() + 4);

    match model {
        GrowthModel::CompoundContribution => {
            lines.push(SummaryLine::amount("Start Amount", summary.initial_value));
            for checkpoint in &summary.checkpoints {
                lines.push(SummaryLine::amount(
                    format!("Amount after {} years", checkpoint.year),
                    checkpoint.end_value,
                ));
            }
            lines.push(SummaryLine::amount("Total Interest", summary.total_delta));
            lines.push(SummaryLine::amount("Total Growth", summary.growth));
            lines.push(SummaryLine::percent("Growth %", summary.growth_percent));
        }
        GrowthModel::AnnualCompounding => {
            for checkpoint in &summary.checkpoints {
                lines.push(SummaryLine::amount(
                    format!("Total Savings after {} years", checkpoint.year),
                    checkpoint.total_accumulated,
                ));
            }
            lines.push(SummaryLine::amount("Total Salary Increase", summary.total_delta));
            lines.push(SummaryLine::amount("Final Annual Income", summary.final_period_value));
        }
    }

    lines
}

/// Full export: comment header, year table and (optionally) the summary section
pub fn serialize(result: &ProjectionResult, summary: &Summary, options: &ExportOptions) -> Result<String> {
    let model = result.model();
    let delimiter = options.format.delimiter() as char;

    let mut text = format!("# {} Export\n", title(model));
    if let Some(generated_at) = options.generated_at {
        text.push_str(&format!("# Generated: {}\n", generated_at.format(TIMESTAMP_FORMAT)));
    }
    for (label, value) in settings(result.inputs()) {
        text.push_str(&format!("# {}{}{}\n", label, delimiter, value));
    }

    text.push_str(&serialize_table(result.records(), model, options.format)?);

    if options.include_summary {
        let mut writer = WriterBuilder::new()
            .delimiter(options.format.delimiter())
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(["Summary"])?;
        for line in summary_lines(model, summary) {
            writer.write_record([line.label.as_str(), format_amount(line.value).as_str()])?;
        }

        text.push('\n');
        text.push_str(&finish(writer)?);
    }

    Ok(text)
}

/// Email subject line
pub fn email_subject(result: &ProjectionResult) -> String {
    let inputs = result.inputs();
    match inputs.model() {
        GrowthModel::CompoundContribution => {
            format!("Interest Calculation - Start Amount: {} kr", inputs.principal())
        }
        GrowthModel::AnnualCompounding => {
            format!("Church Tax Calculation - Income: {} kr", inputs.principal())
        }
    }
}

/// Plain text email body with inputs and summary figures
pub fn email_body(result: &ProjectionResult, summary: &Summary, generated_at: Option<NaiveDateTime>) -> String {
    let model = result.model();
    let inputs = result.inputs();

    let mut body = format!("{} Results\n", title(model));
    body.push_str("================================\n\n");

    if let Some(generated_at) = generated_at {
        body.push_str(&format!("Generated: {}\n\n", generated_at.format(TIMESTAMP_FORMAT)));
    }

    body.push_str("Input Parameters:\n");
    for (label, value) in settings(inputs) {
        if label.ends_with('%') {
            body.push_str(&format!("- {}: {}%\n", label, value));
        } else {
            body.push_str(&format!("- {}: {}\n", label, format_currency(value)));
        }
    }

    body.push_str("\nSummary Results:\n");
    for line in summary_lines(model, summary) {
        body.push_str(&format!("- {}: {}\n", line.label, line.display_value()));
    }

    body.push_str("\nFull data table is attached as CSV.\n");
    body.push_str("\nBest regards,\nOld Money Calculator");

    body
}
