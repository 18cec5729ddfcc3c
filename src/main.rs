//! Savings Projection CLI
//!
//! Command-line interface for running 40-year projections and exporting them

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use savings_projection::email::{compose_message, EmailRelay, SendGridConfig, SendGridRelay};
use savings_projection::export::{
    columns, default_file_name, format_currency, row_values, summary_lines, title,
};
use savings_projection::inputs::load_inputs;
use savings_projection::{
    serialize, Calculation, CalculatorError, ExportFormat, ExportOptions, ProjectionResult,
    RawInputs, ScenarioRunner,
};

#[derive(Parser)]
#[command(name = "savings_projection", version, about = "40-year savings and income projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compound interest with monthly savings
    Interest {
        #[arg(long, allow_hyphen_values = true)]
        start_amount: String,
        /// Annual interest rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,
        /// Amount added every month (blank means 0)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        monthly_savings: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Income with yearly salary increases, saving a percentage every year
    Income {
        #[arg(long, default_value = "300000", allow_hyphen_values = true)]
        annual_income: String,
        /// Yearly salary increase in percent
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        salary_increase: String,
        /// Share of income saved, in percent
        #[arg(long, default_value = "1.2", allow_hyphen_values = true)]
        savings_percent: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run every row of a CSV file (Model,Principal,Rate,Contribution)
    Batch {
        #[arg(long)]
        input: PathBuf,
        /// Write one export per valid row into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
    },
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    format: FormatArg,
    /// Write the export to this file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the export to a dated file in the current directory
    #[arg(long)]
    save: bool,
    /// Add a generation timestamp to the export
    #[arg(long)]
    timestamp: bool,
    /// Email the results (needs SENDGRID_API_KEY and SENDGRID_FROM)
    #[arg(long)]
    email_to: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Interest { start_amount, rate, monthly_savings, output } => {
            calculate(RawInputs::interest(start_amount, rate, monthly_savings), &output)
        }
        Command::Income { annual_income, salary_increase, savings_percent, output } => {
            calculate(RawInputs::income(annual_income, salary_increase, savings_percent), &output)
        }
        Command::Batch { input, output_dir, format } => batch(&input, output_dir.as_deref(), format.into()),
    }
}

fn calculate(raw: RawInputs, output: &OutputArgs) -> Result<()> {
    let calculation = match ScenarioRunner::new().run(&raw) {
        Ok(calculation) => calculation,
        Err(CalculatorError::Validation(errors)) => {
            for error in errors.errors() {
                eprintln!("  {}: {}", error.field.label(error.model), error.message());
            }
            bail!("{} invalid input(s)", errors.len());
        }
        Err(e) => return Err(e.into()),
    };

    print_summary(&calculation);
    print_table(&calculation.result);

    let generated_at = output.timestamp.then(|| Local::now().naive_local());
    let format = ExportFormat::from(output.format);

    let path = match (&output.output, output.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(default_file_name(
            calculation.result.model(),
            Local::now().date_naive(),
            format,
        ))),
        (None, false) => None,
    };

    if let Some(path) = path {
        let options = ExportOptions { format, generated_at, include_summary: true };
        let text = serialize(&calculation.result, &calculation.summary, &options)?;
        fs::write(&path, text).with_context(|| format!("Unable to write {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    if let Some(to) = &output.email_to {
        send_email(to, &calculation, generated_at)?;
    }

    Ok(())
}

fn batch(input: &Path, output_dir: Option<&Path>, format: ExportFormat) -> Result<()> {
    let inputs = load_inputs(input).with_context(|| format!("Unable to load {}", input.display()))?;
    println!("Loaded {} scenarios from {}", inputs.len(), input.display());

    if let Some(dir) = output_dir {
        fs::create_dir_all(dir).with_context(|| format!("Unable to create {}", dir.display()))?;
    }

    let results = ScenarioRunner::new().run_batch(&inputs);

    for (i, (raw, result)) in inputs.iter().zip(&results).enumerate() {
        let row = i + 1;
        match result {
            Ok(calculation) => {
                println!(
                    "  Row {:>3} ({}): final {} / saved {}",
                    row,
                    raw.model.as_str(),
                    format_currency(calculation.summary.final_value),
                    format_currency(calculation.summary.total_savings),
                );

                if let Some(dir) = output_dir {
                    let path = dir.join(format!("scenario_{}_{}.{}", row, raw.model.as_str(), format.extension()));
                    let options = ExportOptions { format, ..Default::default() };
                    let text = serialize(&calculation.result, &calculation.summary, &options)?;
                    fs::write(&path, text).with_context(|| format!("Unable to write {}", path.display()))?;
                }
            }
            Err(e) => println!("  Row {:>3} ({}): {}", row, raw.model.as_str(), e),
        }
    }

    Ok(())
}

fn print_summary(calculation: &Calculation) {
    let model = calculation.result.model();

    println!("{}", title(model));
    println!("{}\n", "=".repeat(title(model).len()));

    println!("Summary:");
    for line in summary_lines(model, &calculation.summary) {
        println!("  {}: {}", line.label, line.display_value());
    }
    println!();
}

fn print_table(result: &ProjectionResult) {
    let model = result.model();
    let header = columns(model);

    // Same grouping as the calculator page
    for (first, last) in [(1, 10), (11, 30), (31, 40)] {
        println!("Years {}-{}:", first, last);
        println!(
            "{:>5} {:>20} {:>20} {:>20} {:>20} {:>20}",
            header[0], header[1], header[2], header[3], header[4], header[5]
        );
        println!("{}", "-".repeat(110));

        for record in result.records().iter().filter(|r| r.year >= first && r.year <= last) {
            let values = row_values(model, record);
            println!(
                "{:>5} {:>20} {:>20} {:>20} {:>20} {:>20}",
                record.year,
                format_currency(values[0]),
                format_currency(values[1]),
                format_currency(values[2]),
                format_currency(values[3]),
                format_currency(values[4]),
            );
        }
        println!();
    }
}

fn send_email(to: &str, calculation: &Calculation, generated_at: Option<NaiveDateTime>) -> Result<()> {
    let message = compose_message(to, &calculation.result, &calculation.summary, generated_at)?;
    let relay = SendGridRelay::new(SendGridConfig::from_env()?);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(relay.send(&message))?;

    println!("Email sent to {}", message.to);
    Ok(())
}
