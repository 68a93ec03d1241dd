//! Percentile calculations for timing samples.
//!
//! This module provides the linear-interpolation percentile estimator and the
//! fixed-size [`PercentileTable`] computed for every profiling run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PercentileTableError;

/// Number of entries in a [`PercentileTable`].
pub const PERCENTILE_COUNT: usize = 13;

/// Ranks reported for every run, in ascending order.
pub const CANONICAL_RANKS: [f64; PERCENTILE_COUNT] = [
    1.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0, 99.0,
];

/// Position of the 50th percentile in [`CANONICAL_RANKS`].
pub const MEDIAN_INDEX: usize = 6;

/// Calculate a percentile from samples that are already sorted ascending.
///
/// For rank `p` and `n` samples the fractional index is `f = p/100 * (n - 1)`.
/// With `i = floor(f)`, the result interpolates linearly between `sorted[i]`
/// and `sorted[i + 1]` with weight `f - i`. When `i` lands on the last sample
/// that sample is returned as is.
///
/// # Arguments
///
/// * `sorted` - Samples in ascending order
/// * `p` - Percentile to calculate (0.0 to 100.0)
///
/// # Returns
///
/// * `Some(value)` - The percentile value
/// * `None` - If `sorted` is empty or `p` is out of range
///
/// # Examples
///
/// ```
/// use perf_harness::stats::percentiles::percentile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&data, 50.0), Some(2.5));
/// assert_eq!(percentile_sorted(&data, 100.0), Some(4.0));
/// ```
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let last = sorted.len() - 1;
    let fractional_index = (p / 100.0) * last as f64;
    let index = fractional_index.floor() as usize;

    if index < last {
        let weight = fractional_index - index as f64;
        Some(sorted[index] * (1.0 - weight) + sorted[index + 1] * weight)
    } else {
        Some(sorted[last])
    }
}

/// Calculate percentile value from a slice of unsorted samples.
///
/// Sorts a copy of the input and defers to [`percentile_sorted`].
///
/// # Examples
///
/// ```
/// use perf_harness::stats::percentiles::percentile;
///
/// let data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// One row of a [`PercentileTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileEntry {
    /// Percentile rank (0-100)
    pub rank: f64,
    /// Value at that rank
    pub value: f64,
}

/// Percentile values for every rank in [`CANONICAL_RANKS`].
///
/// The table is always complete: it is built wholesale from a sample set and
/// never partially updated. It serializes as a list of `{rank, value}`
/// entries and refuses to deserialize a list that omits or repeats a rank.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<PercentileEntry>",
    into = "Vec<PercentileEntry>"
)]
pub struct PercentileTable {
    values: [f64; PERCENTILE_COUNT],
}

impl PercentileTable {
    /// Compute the table from samples sorted in ascending order.
    ///
    /// Returns `None` if `sorted` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use perf_harness::stats::percentiles::PercentileTable;
    ///
    /// let table = PercentileTable::from_sorted(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
    /// assert_eq!(table.median(), 30.0);
    /// assert_eq!(table.get(50.0), Some(30.0));
    /// assert!((table.get(99.0).unwrap() - 49.6).abs() < 1e-9);
    /// ```
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let mut values = [0.0; PERCENTILE_COUNT];
        for (value, rank) in values.iter_mut().zip(CANONICAL_RANKS) {
            *value = percentile_sorted(sorted, rank)?;
        }
        Some(Self { values })
    }

    /// Build a table from `(rank, value)` pairs.
    ///
    /// Every canonical rank must appear exactly once; order does not matter.
    pub fn from_entries<I>(entries: I) -> Result<Self, PercentileTableError>
    where
        I: IntoIterator<Item = PercentileEntry>,
    {
        let mut values = [0.0; PERCENTILE_COUNT];
        let mut seen = [false; PERCENTILE_COUNT];

        for entry in entries {
            let index = rank_index(entry.rank)
                .ok_or(PercentileTableError::UnknownRank(entry.rank))?;
            if seen[index] {
                return Err(PercentileTableError::DuplicateRank(entry.rank));
            }
            seen[index] = true;
            values[index] = entry.value;
        }

        if let Some(missing) = seen.iter().position(|present| !present) {
            return Err(PercentileTableError::MissingRank(CANONICAL_RANKS[missing]));
        }

        Ok(Self { values })
    }

    /// The 50th percentile.
    pub fn median(&self) -> f64 {
        self.values[MEDIAN_INDEX]
    }

    /// Value at a canonical rank, or `None` for any other rank.
    pub fn get(&self, rank: f64) -> Option<f64> {
        rank_index(rank).map(|index| self.values[index])
    }

    /// Values in canonical rank order.
    pub fn values(&self) -> &[f64; PERCENTILE_COUNT] {
        &self.values
    }

    /// Entries in canonical rank order.
    pub fn iter(&self) -> impl Iterator<Item = PercentileEntry> + '_ {
        CANONICAL_RANKS
            .iter()
            .zip(self.values.iter())
            .map(|(&rank, &value)| PercentileEntry { rank, value })
    }

    /// A copy with every value multiplied by `multiplier`.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            values: self.values.map(|value| value * multiplier),
        }
    }
}

fn rank_index(rank: f64) -> Option<usize> {
    CANONICAL_RANKS.iter().position(|&canonical| canonical == rank)
}

impl From<PercentileTable> for Vec<PercentileEntry> {
    fn from(table: PercentileTable) -> Self {
        table.iter().collect()
    }
}

impl TryFrom<Vec<PercentileEntry>> for PercentileTable {
    type Error = PercentileTableError;

    fn try_from(entries: Vec<PercentileEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl fmt::Display for PercentileTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.iter() {
            writeln!(f, "{:>5.1}% : {:.6}", entry.rank, entry.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_empty_samples() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile_sorted(&[], 50.0), None);
    }

    #[test]
    fn test_percentile_single_sample() {
        let samples = [42.0];
        assert_eq!(percentile_sorted(&samples, 0.0), Some(42.0));
        assert_eq!(percentile_sorted(&samples, 1.0), Some(42.0));
        assert_eq!(percentile_sorted(&samples, 100.0), Some(42.0));
    }

    #[test]
    fn test_percentile_invalid_p() {
        let samples = [1.0, 2.0, 3.0];
        assert_eq!(percentile_sorted(&samples, -1.0), None);
        assert_eq!(percentile_sorted(&samples, 101.0), None);
        assert_eq!(percentile_sorted(&samples, f64::NAN), None);
    }

    #[test]
    fn test_percentile_bounds_hit_min_and_max() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile_sorted(&samples, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&samples, 50.0), Some(3.0));
        assert_eq!(percentile_sorted(&samples, 100.0), Some(5.0));
    }

    #[test]
    fn test_percentile_with_interpolation() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

        // f = 0.25 * 9 = 2.25, between 3 and 4
        let p25 = percentile_sorted(&samples, 25.0).unwrap();
        assert!((p25 - 3.25).abs() < 1e-10);

        let p75 = percentile_sorted(&samples, 75.0).unwrap();
        assert!((p75 - 7.75).abs() < 1e-10);
    }

    #[test]
    fn test_percentile_low_rank_near_first_sample() {
        let samples = [10.0, 20.0, 30.0, 40.0, 50.0];
        let p1 = percentile_sorted(&samples, 1.0).unwrap();
        assert!((p1 - 10.4).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_unsorted_samples() {
        let samples = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(percentile(&samples, 50.0), Some(3.0));
    }

    #[test]
    fn test_percentile_with_duplicates() {
        let samples = vec![1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&samples, 50.0), Some(2.0));
    }

    #[test]
    fn test_table_median_matches_rank_50() {
        let sorted = [3.0, 7.0, 8.0, 12.0, 13.0, 21.0];
        let table = PercentileTable::from_sorted(&sorted).unwrap();
        assert_eq!(table.median(), percentile_sorted(&sorted, 50.0).unwrap());
        assert_eq!(table.median(), 10.0);
    }

    #[test]
    fn test_table_empty_samples() {
        assert!(PercentileTable::from_sorted(&[]).is_none());
    }

    #[test]
    fn test_table_iter_follows_canonical_ranks() {
        let table = PercentileTable::from_sorted(&[1.0, 2.0]).unwrap();
        let ranks: Vec<f64> = table.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, CANONICAL_RANKS.to_vec());
    }

    #[test]
    fn test_table_get_unknown_rank() {
        let table = PercentileTable::from_sorted(&[1.0, 2.0]).unwrap();
        assert_eq!(table.get(25.0), None);
        assert!((table.get(1.0).unwrap() - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_table_scaled() {
        let table = PercentileTable::from_sorted(&[1000.0]).unwrap();
        let scaled = table.scaled(1e-3);
        assert!(scaled.values().iter().all(|&value| value == 1.0));
    }

    #[test]
    fn test_from_entries_rejects_missing_rank() {
        let entries = CANONICAL_RANKS
            .iter()
            .skip(1)
            .map(|&rank| PercentileEntry { rank, value: 0.0 });
        assert_eq!(
            PercentileTable::from_entries(entries),
            Err(PercentileTableError::MissingRank(1.0))
        );
    }

    #[test]
    fn test_from_entries_rejects_duplicate_rank() {
        let mut entries: Vec<PercentileEntry> = CANONICAL_RANKS
            .iter()
            .map(|&rank| PercentileEntry { rank, value: rank })
            .collect();
        entries.push(PercentileEntry { rank: 50.0, value: 1.0 });
        assert_eq!(
            PercentileTable::from_entries(entries),
            Err(PercentileTableError::DuplicateRank(50.0))
        );
    }

    #[test]
    fn test_from_entries_rejects_unknown_rank() {
        let entries = vec![PercentileEntry { rank: 25.0, value: 0.0 }];
        assert_eq!(
            PercentileTable::from_entries(entries),
            Err(PercentileTableError::UnknownRank(25.0))
        );
    }

    #[test]
    fn test_from_entries_accepts_any_order() {
        let table = PercentileTable::from_sorted(&[1.0, 5.0, 9.0]).unwrap();
        let mut entries: Vec<PercentileEntry> = table.iter().collect();
        entries.reverse();
        assert_eq!(PercentileTable::from_entries(entries), Ok(table));
    }

    #[test]
    fn test_json_roundtrip_keeps_every_rank() {
        let table = PercentileTable::from_sorted(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: PercentileTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_json_rejects_incomplete_table() {
        let json = r#"[{"rank": 50.0, "value": 3.0}]"#;
        assert!(serde_json::from_str::<PercentileTable>(json).is_err());
    }
}
