//! The analytics engine: owns one run's samples and the statistics derived
//! from them.

use serde::{Deserialize, Serialize};

use super::percentiles::PercentileTable;
use super::scale::TimeScale;
use crate::error::HarnessError;

/// Sample buffer plus the statistics computed from it.
///
/// Samples are registered in nanoseconds. After [`Analytics::compute_analytics`]
/// the display accessors (`mean`, `std_dev`, `median`, `percentiles`,
/// `scaled_samples`) report values in the detected [`TimeScale`], while the
/// `*_nanos` accessors and [`Analytics::samples`] stay in nanoseconds.
///
/// Until an analysis pass has run, every derived figure is zero and the scale
/// is nanoseconds.
///
/// # Examples
///
/// ```
/// use perf_harness::stats::{Analytics, TimeScale};
///
/// let mut analytics = Analytics::new(5);
/// for sample in [10.0, 20.0, 30.0, 40.0, 50.0] {
///     analytics.register(sample).unwrap();
/// }
/// analytics.compute_analytics().unwrap();
///
/// assert_eq!(analytics.mean(), 30.0);
/// assert_eq!(analytics.median(), 30.0);
/// assert_eq!(analytics.time_scale(), TimeScale::Nanoseconds);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analytics {
    samples: Vec<f64>,
    percentiles: PercentileTable,
    mean: f64,
    std_dev: f64,
    scale: TimeScale,
    analyzed: bool,
}

impl Analytics {
    /// Create an engine with room for `expected_count` samples.
    pub fn new(expected_count: usize) -> Self {
        let mut analytics = Self::default();
        analytics.reset(expected_count);
        analytics
    }

    /// Drop every sample and zero all derived statistics.
    ///
    /// `expected_count` only pre-sizes the buffer; more samples may follow.
    pub fn reset(&mut self, expected_count: usize) {
        self.samples.clear();
        // An unsatisfiable hint is ignored; the buffer grows on demand.
        let _ = self.samples.try_reserve(expected_count);

        self.percentiles = PercentileTable::default();
        self.mean = 0.0;
        self.std_dev = 0.0;
        self.scale = TimeScale::Nanoseconds;
        self.analyzed = false;
    }

    /// Append one sample, in nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidSample`] for negative or non-finite
    /// values. The sample set is left untouched in that case.
    pub fn register(&mut self, nanos: f64) -> Result<(), HarnessError> {
        if !nanos.is_finite() || nanos < 0.0 {
            return Err(HarnessError::InvalidSample(nanos));
        }
        self.samples.push(nanos);
        self.analyzed = false;
        Ok(())
    }

    /// Sort the samples and recompute every derived statistic.
    ///
    /// Runs, in order: sort, percentiles, mean, standard deviation, scale
    /// detection.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::EmptySampleSet`] if nothing was registered.
    pub fn compute_analytics(&mut self) -> Result<(), HarnessError> {
        if self.samples.is_empty() {
            return Err(HarnessError::EmptySampleSet);
        }

        self.samples.sort_by(f64::total_cmp);
        self.percentiles =
            PercentileTable::from_sorted(&self.samples).ok_or(HarnessError::EmptySampleSet)?;
        self.mean = mean(&self.samples);
        self.std_dev = population_std_dev(&self.samples, self.mean);
        self.scale = TimeScale::detect(&self.samples);
        self.analyzed = true;

        Ok(())
    }

    /// Whether derived statistics reflect the current samples.
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Detected display scale
    pub fn time_scale(&self) -> TimeScale {
        self.scale
    }

    /// Multiplier from nanoseconds to the display scale
    pub fn multiplier(&self) -> f64 {
        self.scale.multiplier()
    }

    /// Mean in display units
    pub fn mean(&self) -> f64 {
        self.mean * self.multiplier()
    }

    /// Population standard deviation in display units
    pub fn std_dev(&self) -> f64 {
        self.std_dev * self.multiplier()
    }

    /// Median in display units
    pub fn median(&self) -> f64 {
        self.percentiles.median() * self.multiplier()
    }

    /// Percentile table in display units
    pub fn percentiles(&self) -> PercentileTable {
        self.percentiles.scaled(self.multiplier())
    }

    /// Samples in display units (sorted once analyzed)
    pub fn scaled_samples(&self) -> impl Iterator<Item = f64> + '_ {
        let multiplier = self.multiplier();
        self.samples.iter().map(move |&sample| sample * multiplier)
    }

    pub fn mean_nanos(&self) -> f64 {
        self.mean
    }

    pub fn std_dev_nanos(&self) -> f64 {
        self.std_dev
    }

    pub fn median_nanos(&self) -> f64 {
        self.percentiles.median()
    }

    pub fn percentiles_nanos(&self) -> &PercentileTable {
        &self.percentiles
    }

    /// Raw samples in nanoseconds (sorted once analyzed)
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Export the statistics in display units.
    ///
    /// Returns `None` until [`Analytics::compute_analytics`] has succeeded
    /// for the current samples.
    pub fn summary(&self) -> Option<Summary> {
        if !self.analyzed {
            return None;
        }

        Some(Summary {
            scale: self.scale,
            mean: self.mean(),
            median: self.median(),
            std_dev: self.std_dev(),
            percentiles: self.percentiles(),
            observations: self.scaled_samples().collect(),
        })
    }
}

/// Serializable snapshot of one analyzed run, in `scale` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Display unit of every figure below
    pub scale: TimeScale,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub percentiles: PercentileTable,
    /// Sorted samples
    pub observations: Vec<f64>,
}

impl Summary {
    /// Mean minus and plus one standard deviation.
    pub fn one_sigma_range(&self) -> (f64, f64) {
        (self.mean - self.std_dev, self.mean + self.std_dev)
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

// Two-pass centred form; same divide-by-n result as sqrt(E[x^2] - E[x]^2)
// without the cancellation on large, tightly grouped samples.
fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    let squared_diffs: f64 = samples.iter().map(|&x| (x - mean).powi(2)).sum();
    (squared_diffs / samples.len() as f64).sqrt()
}
