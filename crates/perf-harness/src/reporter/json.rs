//! JSON reporter for profiling results

use crate::profiler::Report;
use anyhow::{Context, Result};

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a report as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The report to format
    /// * `pretty` - Whether to pretty-print the JSON
    ///
    /// # Returns
    ///
    /// JSON string representation of the report
    pub fn format(report: &Report, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }

    /// Parse a report previously written by [`JsonReporter::format`]
    pub fn parse(json: &str) -> Result<Report> {
        serde_json::from_str(json).context("Failed to parse JSON report")
    }
}
