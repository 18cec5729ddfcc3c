//! Load batches of calculator inputs from CSV
//!
//! Expected columns: `Model,Principal,Rate,Contribution`, where `Model` is
//! `interest` or `income`. Numeric columns are kept as text so that the
//! validator sees them exactly as written.

use std::io::Read;
use std::path::Path;

use csv::{Reader, Trim};

use super::data::{GrowthModel, RawInputs};
use crate::error::{CalculatorError, Result};

/// Raw CSV row matching the batch file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Rate")]
    rate: String,
    #[serde(rename = "Contribution", default)]
    contribution: String,
}

impl CsvRow {
    fn into_inputs(self, line: usize) -> Result<RawInputs> {
        let model = GrowthModel::from_name(&self.model).ok_or_else(|| CalculatorError::Parse {
            message: format!("line {}: unknown model '{}'", line, self.model),
        })?;
        Ok(RawInputs::new(model, self.principal, self.rate, self.contribution))
    }
}

/// Load all input rows from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<RawInputs>> {
    let file = std::fs::File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load input rows from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: Read>(reader: R) -> Result<Vec<RawInputs>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: Read>(reader: &mut Reader<R>) -> Result<Vec<RawInputs>> {
    let mut inputs = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // header is line 1
        inputs.push(row.into_inputs(i + 2)?);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_inputs_from_reader() {
        let data = "Model,Principal,Rate,Contribution\n\
                    interest,10000,5,500\n\
                    income, 300000 ,2,1.2\n\
                    interest,abc,5,\n";
        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();

        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], RawInputs::interest("10000", "5", "500"));
        assert_eq!(inputs[1], RawInputs::income("300000", "2", "1.2"));
        // Bad numbers are left for the validator
        assert_eq!(inputs[2].principal, "abc");
        assert_eq!(inputs[2].contribution, "");
    }

    #[test]
    fn test_unknown_model_reports_line() {
        let data = "Model,Principal,Rate,Contribution\ninterest,1,1,1\nmortgage,1,1,1\n";
        let err = load_inputs_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got {}", err);
    }
}
