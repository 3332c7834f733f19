//! Tabular output shared by the listing commands.
//!
//! Every listing is a header row plus string rows, rendered as a
//! tab-separated table, CSV or TSV. JSON output is produced from the
//! serialized domain values instead.

use crate::error::CliError;
use clap::ValueEnum;
use serde::Serialize;
use staybook::{Config, Money};
use std::io::Write;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<staybook::config::OutputFormat> for OutputFormat {
    fn from(format: staybook::config::OutputFormat) -> Self {
        match format {
            staybook::config::OutputFormat::Table => Self::Table,
            staybook::config::OutputFormat::Json => Self::Json,
            staybook::config::OutputFormat::Csv => Self::Csv,
            staybook::config::OutputFormat::Tsv => Self::Tsv,
        }
    }
}

impl OutputFormat {
    /// The flag if given, else the configured format, else a table.
    pub fn resolve(flag: Option<Self>, config: &Config) -> Self {
        flag.or_else(|| config.output_format.map(Self::from))
            .unwrap_or(Self::Table)
    }
}

/// A header row plus data rows.
pub struct Rows<'a> {
    /// Column headers, lowercase.
    pub headers: &'a [&'a str],
    /// One entry per record.
    pub rows: Vec<Vec<String>>,
}

impl Rows<'_> {
    /// Write rows in a non-JSON format.
    pub fn write(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Table | OutputFormat::Json => self.write_table(),
            OutputFormat::Csv => self.write_delimited(b','),
            OutputFormat::Tsv => self.write_delimited(b'\t'),
        }
    }

    /// Format rows as a human-readable table.
    fn write_table(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        // Print header (uppercase for table display)
        let header_line = self
            .headers
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(handle, "{header_line}")?;

        for row in &self.rows {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
                .collect();
            writeln!(handle, "{}", cells.join("\t"))?;
        }

        Ok(())
    }

    /// Format rows as delimited output (CSV or TSV).
    fn write_delimited(&self, delimiter: u8) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let handle = stdout.lock();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(handle);

        writer.write_record(self.headers).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Render an amount: grouped digits in a table, raw minor units otherwise.
pub fn money(amount: Money, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => amount.to_string(),
        _ => amount.minor_units().to_string(),
    }
}

/// Print a value as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, value)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
