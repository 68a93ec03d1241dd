//! Console reporter for profiling results
//!
//! Provides human-readable output with every figure in the run's display unit.

use anyhow::Result;
use std::fmt::Write;

use crate::profiler::Report;
use crate::stats::Summary;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a report for console output
    ///
    /// # Arguments
    ///
    /// * `report` - The report to format
    /// * `include_percentiles` - Append the full percentile table
    /// * `include_observations` - Append every (sorted) observation
    pub fn format(
        report: &Report,
        include_percentiles: bool,
        include_observations: bool,
    ) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                      PROFILING RESULTS                       ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Run:       {}", report.label)?;
        writeln!(output, "Started:   {}", report.started_at)?;
        writeln!(output, "Duration:  {}ms", report.total_duration_ms)?;
        writeln!(output)?;

        write!(output, "{}", report.config)?;
        writeln!(output)?;

        Self::format_summary(&mut output, &report.summary, include_percentiles, include_observations)?;

        writeln!(output, "{}", average_line(&report.summary))?;
        Ok(output)
    }

    fn format_summary(
        output: &mut String,
        summary: &Summary,
        include_percentiles: bool,
        include_observations: bool,
    ) -> Result<()> {
        let unit = summary.scale.label();

        writeln!(output, "Average           : \t{:.6} {}", summary.mean, unit)?;
        writeln!(output, "Median            : \t{:.6} {}", summary.median, unit)?;
        writeln!(output, "Standard Deviation: \t{:.6} {}", summary.std_dev, unit)?;

        if include_percentiles {
            writeln!(output, "Percentiles:")?;
            writeln!(output, "-----------------")?;
            for entry in summary.percentiles.iter() {
                writeln!(output, "{:>4}\t%  :\t{:.6} {}", entry.rank, entry.value, unit)?;
            }
            writeln!(output, "-----------------")?;
        }

        if include_observations {
            writeln!(output, "Observations:")?;
            writeln!(output, "-----------------")?;
            for (i, observation) in summary.observations.iter().enumerate() {
                writeln!(output, "{}  \t:\t{:.6} {}", i, observation, unit)?;
            }
            writeln!(output, "-----------------")?;
        }

        Ok(())
    }
}

/// One-line mean with its one-sigma band: `Average: m [ m-σ, m+σ ] unit`.
pub fn average_line(summary: &Summary) -> String {
    let (lo, hi) = summary.one_sigma_range();
    format!(
        "Average: {:.6} [ {:.6}, {:.6} ] {}",
        summary.mean, lo, hi, summary.scale
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::test_support::create_test_report;

    #[test]
    fn test_console_format_contains_label_and_config() {
        let report = create_test_report();
        let output = ConsoleReporter::format(&report, false, false).unwrap();

        assert!(output.contains("Run:       Test Run"));
        assert!(output.contains("#Iterations           : \t5"));
        assert!(output.contains("#Iterations Per Cycle : \t2"));
    }

    #[test]
    fn test_console_format_uses_display_unit() {
        let report = create_test_report();
        let output = ConsoleReporter::format(&report, false, false).unwrap();

        assert!(output.contains("Average           : \t3.000000 us"));
        assert!(output.contains("Median            : \t3.000000 us"));
        assert!(output.contains("Standard Deviation: \t1.414214 us"));
    }

    #[test]
    fn test_console_format_percentiles_optional() {
        let report = create_test_report();
        let output = ConsoleReporter::format(&report, true, false).unwrap();

        assert!(output.contains("Percentiles:"));
        assert!(output.contains("  50\t%  :\t3.000000 us"));
        assert!(!output.contains("Observations:"));
    }

    #[test]
    fn test_console_format_observations_optional() {
        let report = create_test_report();
        let output = ConsoleReporter::format(&report, false, true).unwrap();

        assert!(output.contains("Observations:"));
        assert!(output.contains("4  \t:\t5.000000 us"));
    }

    #[test]
    fn test_average_line() {
        let report = create_test_report();
        let line = average_line(&report.summary);
        assert_eq!(line, "Average: 3.000000 [ 1.585786, 4.414214 ] us");
    }
}
