//! Profiling result reporting
//!
//! This module turns a [`Report`] into text for people, JSON for machines,
//! a CSV percentile table for spreadsheets, or a matplotlib script for plots.
//!
//! # Output Formats
//!
//! - **Console**: Human-readable summary in the run's display unit
//! - **JSON**: Machine-readable format, compact or pretty
//! - **CSV**: Percentile table, rank header row then value row
//! - **PythonPlot**: Self-contained matplotlib script
//!
//! # Example
//!
//! ```no_run
//! use perf_harness::reporter::{OutputFormat, Reporter};
//! use perf_harness::profiler::Report;
//!
//! # fn example(report: Report) -> anyhow::Result<()> {
//! Reporter::new(OutputFormat::Console)
//!     .with_percentiles(true)
//!     .report(&report)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::Csv).write_to_file(&report, "percentiles.csv")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod csv_table;
mod json;
mod plot;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::profiler::Report;

pub use self::console::{average_line, ConsoleReporter};
pub use self::csv_table::{parse_percentile_csv, CsvReporter};
pub use self::json::JsonReporter;
pub use self::plot::PlotReporter;

/// Output format for profiling results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Console output with aligned labels
    #[default]
    Console,
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Percentile table as CSV
    Csv,
    /// Matplotlib plotting script
    PythonPlot,
}

/// Reporter for profiling results
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    format: OutputFormat,
    include_percentiles: bool,
    include_observations: bool,
    show_plot: bool,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Console: list the percentile table. CSV: add the rank header row.
    pub fn with_percentiles(mut self, include: bool) -> Self {
        self.include_percentiles = include;
        self
    }

    /// Console: list every observation. PythonPlot: add a histogram.
    pub fn with_observations(mut self, include: bool) -> Self {
        self.include_observations = include;
        self
    }

    /// PythonPlot: end the script with `plt.show()`.
    pub fn with_plot_window(mut self, show: bool) -> Self {
        self.show_plot = show;
        self
    }

    /// Report results to stdout
    pub fn report(&self, report: &Report) -> Result<()> {
        let output = self.format_report(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &Report, path: P) -> Result<()> {
        let path = path.as_ref();
        let output = self.format_report(report)?;
        fs::write(path, output)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Console => ConsoleReporter::format(
                report,
                self.include_percentiles,
                self.include_observations,
            ),
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Csv => {
                CsvReporter::format(&report.summary.percentiles, self.include_percentiles)
            }
            OutputFormat::PythonPlot => PlotReporter::format(
                &report.summary,
                &report.label,
                self.include_observations,
                self.show_plot,
            ),
        }
    }
}
