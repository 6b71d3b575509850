//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use bondcurve_config::OutputConfig;

use crate::cli::OutputFormat;

/// Prints rows in the requested format.
///
/// `minimal` renders one line per row for [`OutputFormat::Minimal`].
pub fn print_rows<T, M>(rows: &[T], format: OutputFormat, minimal: M) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
    M: Fn(&T) -> String,
{
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(rows),
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Minimal => {
            for row in rows {
                println!("{}", minimal(row));
            }
            Ok(())
        }
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(rows: &[T]) -> anyhow::Result<()> {
    if rows.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints a table whose columns are only known at run time.
pub fn print_dynamic_table(header: Vec<String>, rows: Vec<Vec<String>>) {
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    let table = builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as CSV with a header.
pub fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints raw CSV records.
pub fn print_csv_records(header: &[String], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Number formatting driven by the output configuration.
#[derive(Debug, Clone, Copy)]
pub struct Numbers {
    config: OutputConfig,
}

impl Numbers {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// A price or amount.
    pub fn price(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.config.price_decimals)
    }

    /// A discount factor.
    pub fn factor(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.config.factor_decimals)
    }

    /// A decimal rate shown in percent.
    pub fn percent(&self, rate: f64) -> String {
        format!("{:.prec$}%", rate * 100.0, prec = self.config.rate_decimals)
    }

    /// A value already in percent.
    pub fn percent_value(&self, value: f64) -> String {
        format!("{value:.prec$}%", prec = self.config.rate_decimals)
    }
}
