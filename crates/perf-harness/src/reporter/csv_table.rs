//! CSV export of the percentile table
//!
//! The table is written as at most two records: an optional header of ranks,
//! then the values in the same order.

use anyhow::{anyhow, bail, Context, Result};

use crate::stats::{PercentileEntry, PercentileTable, CANONICAL_RANKS, PERCENTILE_COUNT};

/// CSV format reporter
pub struct CsvReporter;

impl CsvReporter {
    /// Format a percentile table as CSV
    ///
    /// # Arguments
    ///
    /// * `table` - The percentile table to export
    /// * `include_ranks` - Write the header record of ranks first
    pub fn format(table: &PercentileTable, include_ranks: bool) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        if include_ranks {
            writer.write_record(table.iter().map(|entry| entry.rank.to_string()))?;
        }
        writer.write_record(table.iter().map(|entry| entry.value.to_string()))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output was not UTF-8")
    }
}

/// Parse CSV written by [`CsvReporter::format`] back into a table.
///
/// With two records the first holds the ranks; a single record is read as
/// values in canonical rank order.
pub fn parse_percentile_csv(input: &str) -> Result<PercentileTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed CSV record")?;
        let row = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .context("Non-numeric CSV field")?;
        rows.push(row);
    }

    let entries: Vec<PercentileEntry> = match rows.as_slice() {
        [values] => {
            if values.len() != PERCENTILE_COUNT {
                bail!(
                    "Expected {} percentile values, found {}",
                    PERCENTILE_COUNT,
                    values.len()
                );
            }
            CANONICAL_RANKS
                .iter()
                .zip(values)
                .map(|(&rank, &value)| PercentileEntry { rank, value })
                .collect()
        }
        [ranks, values] => ranks
            .iter()
            .zip(values)
            .map(|(&rank, &value)| PercentileEntry { rank, value })
            .collect(),
        _ => bail!("Expected 1 or 2 CSV records, found {}", rows.len()),
    };

    Ok(PercentileTable::from_entries(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PercentileTableError;

    fn sample_table() -> PercentileTable {
        PercentileTable::from_sorted(&[12.5, 13.0, 14.25, 19.0, 250.0]).unwrap()
    }

    #[test]
    fn test_csv_with_ranks() {
        let output = CsvReporter::format(&sample_table(), true).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("1,5,10,20,30,40,50,60,70,80,90,95,99")
        );
        assert!(lines.next().unwrap().starts_with("12.5"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_roundtrip_with_ranks() {
        let table = sample_table();
        let output = CsvReporter::format(&table, true).unwrap();
        assert_eq!(parse_percentile_csv(&output).unwrap(), table);
    }

    #[test]
    fn test_csv_roundtrip_values_only() {
        let table = sample_table();
        let output = CsvReporter::format(&table, false).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert_eq!(parse_percentile_csv(&output).unwrap(), table);
    }

    #[test]
    fn test_parse_rejects_duplicate_rank() {
        let input = "1,5,10,20,30,40,50,60,70,80,90,95,95\n0,0,0,0,0,0,0,0,0,0,0,0,0\n";
        let err = parse_percentile_csv(input).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PercentileTableError>(),
            Some(&PercentileTableError::DuplicateRank(95.0))
        );
    }

    #[test]
    fn test_parse_rejects_short_row() {
        assert!(parse_percentile_csv("1,2,3\n").is_err());
        assert!(parse_percentile_csv("").is_err());
        assert!(parse_percentile_csv("a,b\n").is_err());
    }
}
