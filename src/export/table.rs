//! Machine-readable year table (CSV or tab-separated)

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};
use crate::inputs::GrowthModel;
use crate::projection::YearRecord;

/// Column set of the interest calculator table
pub const INTEREST_COLUMNS: [&str; 6] = [
    "Year",
    "Start Amount",
    "Interest",
    "End Amount",
    "Monthly Equiv.",
    "Yearly Increase",
];

/// Column set of the church tax (income/savings) table
pub const INCOME_COLUMNS: [&str; 6] = [
    "Year",
    "Income",
    "Salary Increase",
    "Annual Savings",
    "Monthly Savings",
    "Total Accumulated",
];

/// Delimited text flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Comma separated, for file export
    #[default]
    Csv,
    /// Tab separated, for clipboard copy
    Tsv,
}

impl ExportFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

/// One data row read back from an exported table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub year: u32,
    /// The five numeric columns after `Year`, in header order
    pub values: [f64; 5],
}

/// Header row for a model
pub fn columns(model: GrowthModel) -> &'static [&'static str; 6] {
    match model {
        GrowthModel::CompoundContribution => &INTEREST_COLUMNS,
        GrowthModel::AnnualCompounding => &INCOME_COLUMNS,
    }
}

/// Numeric columns of a record, in header order
pub fn row_values(model: GrowthModel, record: &YearRecord) -> [f64; 5] {
    match model {
        GrowthModel::CompoundContribution => [
            record.start_value,
            record.delta,
            record.end_value,
            record.monthly_equivalent,
            record.period_increase,
        ],
        GrowthModel::AnnualCompounding => [
            record.start_value,
            record.delta,
            record.annual_savings,
            record.monthly_equivalent,
            record.total_accumulated,
        ],
    }
}

/// Two decimals with `.` as separator
pub fn format_amount(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Header plus one row per record. Identical input gives identical bytes.
pub fn serialize_table(records: &[YearRecord], model: GrowthModel, format: ExportFormat) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns(model))?;

    for record in records {
        let mut row = Vec::with_capacity(6);
        row.push(record.year.to_string());
        row.extend(row_values(model, record).iter().map(|v| format_amount(*v)));
        writer.write_record(&row)?;
    }

    finish(writer)
}

pub(crate) fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CalculatorError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CalculatorError::Parse {
        message: e.to_string(),
    })
}

/// Read the year table back from a table or a full export document.
///
/// `#` comment lines are skipped; reading stops at the first row that does not
/// start with a year number (e.g. the summary section).
pub fn parse_table(text: &str, format: ExportFormat) -> Result<Vec<TableRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?;
    if headers.len() != 6 || headers.get(0) != Some("Year") {
        return Err(CalculatorError::Parse {
            message: format!("unexpected header row: {:?}", headers),
        });
    }

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let year = match record.get(0).and_then(|field| field.trim().parse::<u32>().ok()) {
            Some(year) => year,
            None => break,
        };

        let mut values = [0.0; 5];
        for (i, value) in values.iter_mut().enumerate() {
            *value = record
                .get(i + 1)
                .and_then(|field| field.trim().parse::<f64>().ok())
                .ok_or_else(|| CalculatorError::Parse {
                    message: format!("year {}: column {} is not a number", year, i + 2),
                })?;
        }

        rows.push(TableRow { year, values });
    }

    Ok(rows)
}
