//! Statistical analysis of timing samples
//!
//! This module turns a run's raw nanosecond samples into percentiles, mean,
//! population standard deviation and a display time-scale.
//!
//! # Examples
//!
//! ```
//! use perf_harness::stats::{Analytics, TimeScale};
//!
//! let mut analytics = Analytics::new(4);
//! for sample in [2.0e6, 2.5e6, 3.0e6, 4.0e6] {
//!     analytics.register(sample)?;
//! }
//! analytics.compute_analytics()?;
//!
//! assert_eq!(analytics.time_scale(), TimeScale::Milliseconds);
//! println!("Median: {:.3} {}", analytics.median(), analytics.time_scale());
//! # Ok::<(), perf_harness::HarnessError>(())
//! ```

pub mod analytics;
pub mod percentiles;
pub mod scale;

// Re-export main types and functions
pub use analytics::{Analytics, Summary};
pub use percentiles::{
    percentile, percentile_sorted, PercentileEntry, PercentileTable, CANONICAL_RANKS,
    MEDIAN_INDEX, PERCENTILE_COUNT,
};
pub use scale::TimeScale;
