//! Display time-scale detection.
//!
//! Samples are always stored in nanoseconds. For display, a run picks the
//! unit that most of its samples naturally fall into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit used to present timing figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeScale {
    #[default]
    #[serde(rename = "ns")]
    Nanoseconds,
    #[serde(rename = "us")]
    Microseconds,
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "s")]
    Seconds,
}

impl TimeScale {
    /// All scales, finest first. Scale detection breaks ties in this order.
    pub const ALL: [TimeScale; 4] = [
        TimeScale::Nanoseconds,
        TimeScale::Microseconds,
        TimeScale::Milliseconds,
        TimeScale::Seconds,
    ];

    /// Short unit label
    pub fn label(self) -> &'static str {
        match self {
            TimeScale::Nanoseconds => "ns",
            TimeScale::Microseconds => "us",
            TimeScale::Milliseconds => "ms",
            TimeScale::Seconds => "s",
        }
    }

    /// Factor converting nanoseconds into this unit
    pub fn multiplier(self) -> f64 {
        match self {
            TimeScale::Nanoseconds => 1.0,
            TimeScale::Microseconds => 1e-3,
            TimeScale::Milliseconds => 1e-6,
            TimeScale::Seconds => 1e-9,
        }
    }

    /// Convert a nanosecond value into this unit.
    pub fn from_nanos(self, nanos: f64) -> f64 {
        nanos * self.multiplier()
    }

    /// Bucket a single nanosecond value by magnitude.
    ///
    /// Thresholds are exclusive: exactly `1e3` ns is still nanoseconds.
    pub fn classify(nanos: f64) -> Self {
        if nanos > 1e9 {
            TimeScale::Seconds
        } else if nanos > 1e6 {
            TimeScale::Milliseconds
        } else if nanos > 1e3 {
            TimeScale::Microseconds
        } else {
            TimeScale::Nanoseconds
        }
    }

    /// Pick the scale holding the most samples.
    ///
    /// Ties go to the finest scale, following [`TimeScale::ALL`]. An empty
    /// input yields nanoseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use perf_harness::stats::TimeScale;
    ///
    /// let samples = [2.5e6, 3.0e6, 800.0];
    /// assert_eq!(TimeScale::detect(&samples), TimeScale::Milliseconds);
    /// ```
    pub fn detect(samples: &[f64]) -> Self {
        let mut counters = [0usize; 4];
        for &sample in samples {
            counters[Self::classify(sample).index()] += 1;
        }

        let mut best = TimeScale::Nanoseconds;
        for scale in Self::ALL {
            if counters[scale.index()] > counters[best.index()] {
                best = scale;
            }
        }
        best
    }

    fn index(self) -> usize {
        match self {
            TimeScale::Nanoseconds => 0,
            TimeScale::Microseconds => 1,
            TimeScale::Milliseconds => 2,
            TimeScale::Seconds => 3,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds_are_exclusive() {
        assert_eq!(TimeScale::classify(0.0), TimeScale::Nanoseconds);
        assert_eq!(TimeScale::classify(1e3), TimeScale::Nanoseconds);
        assert_eq!(TimeScale::classify(1e3 + 1.0), TimeScale::Microseconds);
        assert_eq!(TimeScale::classify(1e6), TimeScale::Microseconds);
        assert_eq!(TimeScale::classify(2e6), TimeScale::Milliseconds);
        assert_eq!(TimeScale::classify(1e9), TimeScale::Milliseconds);
        assert_eq!(TimeScale::classify(5e9), TimeScale::Seconds);
    }

    #[test]
    fn test_detect_single_bucket() {
        let samples = [2e6, 3e6, 4e6, 5e6];
        assert_eq!(TimeScale::detect(&samples), TimeScale::Milliseconds);
    }

    #[test]
    fn test_detect_majority_wins() {
        let samples = [10.0, 2e3, 3e3, 4e3, 2e9];
        assert_eq!(TimeScale::detect(&samples), TimeScale::Microseconds);
    }

    #[test]
    fn test_detect_tie_prefers_finer_scale() {
        let samples = [5e9, 6e9, 500.0, 600.0];
        assert_eq!(TimeScale::detect(&samples), TimeScale::Nanoseconds);

        let samples = [5e9, 2e6];
        assert_eq!(TimeScale::detect(&samples), TimeScale::Milliseconds);
    }

    #[test]
    fn test_detect_empty() {
        assert_eq!(TimeScale::detect(&[]), TimeScale::Nanoseconds);
    }

    #[test]
    fn test_multipliers_and_labels() {
        assert_eq!(TimeScale::Nanoseconds.multiplier(), 1.0);
        assert_eq!(TimeScale::Microseconds.multiplier(), 1e-3);
        assert_eq!(TimeScale::Milliseconds.multiplier(), 1e-6);
        assert_eq!(TimeScale::Seconds.multiplier(), 1e-9);
        assert_eq!(TimeScale::Microseconds.to_string(), "us");
        assert_eq!(TimeScale::Seconds.from_nanos(2e9), 2.0);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&TimeScale::Milliseconds).unwrap();
        assert_eq!(json, "\"ms\"");
        let parsed: TimeScale = serde_json::from_str("\"us\"").unwrap();
        assert_eq!(parsed, TimeScale::Microseconds);
    }
}
