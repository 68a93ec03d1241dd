//! Micro-benchmarking harness for timing small units of work
//!
//! This crate repeatedly invokes a workload, times it with a monotonic clock
//! and reduces the samples to a mean, a population standard deviation, a
//! fixed percentile table and a display time-scale.
//!
//! # Features
//!
//! - **Measurement Protocol**: Warm-up, batched timing cycles, lifecycle hooks
//! - **Statistical Analysis**: Linear-interpolation percentiles, mean, stdev
//! - **Display Scale**: Figures reported in the unit most samples fall into
//! - **Instrumentation**: Single-shot runs bracketed by external profiler markers
//! - **Multiple Output Formats**: Console, JSON, CSV and matplotlib scripts
//!
//! # Example
//!
//! ```no_run
//! use perf_harness::{Benchmark, HarnessConfig, Profiler};
//! use perf_harness::reporter::{OutputFormat, Reporter};
//!
//! struct Exp {
//!     cache: [f64; 1000],
//! }
//!
//! impl Benchmark for Exp {
//!     fn run_once(&mut self) -> anyhow::Result<()> {
//!         self.cache[0] = 1.0;
//!         for i in 1..self.cache.len() {
//!             self.cache[i] = (-self.cache[i - 1].abs()).exp();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = HarnessConfig::from_file("harness.toml")?;
//! let mut profiler = Profiler::new(config, Exp { cache: [0.0; 1000] });
//! profiler.profile()?;
//!
//! if let Some(report) = profiler.report("exp chain") {
//!     Reporter::new(OutputFormat::Console).report(&report)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Runs can be configured using TOML files:
//!
//! ```toml
//! [harness]
//! iterations = 10000
//! iterations_per_cycle = 5
//! warm_up_iterations = 10
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod instrument;
pub mod profiler;
pub mod reporter;
pub mod stats;

// Re-export main types for convenience
pub use clock::{Clock, StopWatch};
pub use config::HarnessConfig;
pub use error::{ConfigError, HarnessError, PercentileTableError, ProfileError};
pub use profiler::{from_fn, Benchmark, FnBenchmark, Profiler, Report};
pub use reporter::{OutputFormat, Reporter};
pub use stats::{Analytics, PercentileTable, Summary, TimeScale};
