//! Table serialization, export documents and display formatting

mod table;
mod report;
mod display;

pub use table::{
    columns, format_amount, parse_table, row_values, serialize_table, ExportFormat, TableRow,
    INCOME_COLUMNS, INTEREST_COLUMNS,
};
pub use report::{
    default_file_name, email_body, email_subject, serialize, settings, summary_lines, title,
    ExportOptions, SummaryLine,
};
pub use display::{format_currency, format_percent};
