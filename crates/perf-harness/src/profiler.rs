//! Profiling run orchestration
//!
//! This module drives the measurement protocol around a user workload:
//!
//! ```text
//! on_start ─► warm-up (untimed) ─► measurement cycles ─► analytics ─► on_end
//!                                   │
//!                                   └─ clock.start
//!                                      run_once × iterations_per_cycle
//!                                      clock.stop
//!                                      register(elapsed / iterations_per_cycle)
//! ```
//!
//! Timing a whole cycle and dividing by its length keeps workloads shorter
//! than the clock's resolution measurable.
//!
//! # Example
//!
//! ```
//! use perf_harness::{from_fn, HarnessConfig, Profiler};
//!
//! # fn example() -> Result<(), perf_harness::ProfileError> {
//! let mut buffer = vec![0u64; 256];
//! let config = HarnessConfig::new(50).with_iterations_per_cycle(4);
//! let mut profiler = Profiler::new(config, from_fn(|| {
//!     for (i, slot) in buffer.iter_mut().enumerate() {
//!         *slot = (i as u64).wrapping_mul(31);
//!     }
//! }));
//!
//! profiler.profile()?;
//! assert_eq!(profiler.analytics().len(), 50);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::clock::{Clock, StopWatch};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, ProfileError};
use crate::instrument::Instrumentation;
use crate::stats::{Analytics, Summary};

/// A unit of work to profile, plus optional setup and teardown.
///
/// Hooks are opaque to the harness. Any error they return aborts the run and
/// is handed back unchanged inside [`ProfileError::Benchmark`].
pub trait Benchmark {
    /// Called once per run, before warm-up.
    fn on_start(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per run, after analytics are computed.
    fn on_end(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// One invocation of the workload.
    fn run_once(&mut self) -> anyhow::Result<()>;
}

/// [`Benchmark`] over a plain closure with no-op hooks.
pub struct FnBenchmark<F> {
    workload: F,
}

impl<F: FnMut()> Benchmark for FnBenchmark<F> {
    #[inline]
    fn run_once(&mut self) -> anyhow::Result<()> {
        (self.workload)();
        Ok(())
    }
}

/// Wrap a closure as a [`Benchmark`].
pub fn from_fn<F: FnMut()>(workload: F) -> FnBenchmark<F> {
    FnBenchmark { workload }
}

/// Everything worth exporting about one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Free-form name for the run
    pub label: String,
    /// RFC 3339 timestamp of the run start
    pub started_at: String,
    /// Wall time of the whole run, warm-up included
    pub total_duration_ms: u64,
    /// Configuration used for the run
    pub config: HarnessConfig,
    /// Statistics in display units
    pub summary: Summary,
}

#[derive(Debug, Clone)]
struct RunInfo {
    started_at: String,
    total_duration_ms: u64,
}

/// Runs a [`Benchmark`] under the measurement protocol.
///
/// The profiler owns its analytics engine exclusively; every run resets it.
pub struct Profiler<B, C = StopWatch> {
    config: HarnessConfig,
    benchmark: B,
    clock: C,
    analytics: Analytics,
    last_run: Option<RunInfo>,
}

impl<B: Benchmark> Profiler<B> {
    /// Create a profiler timing with a [`StopWatch`].
    pub fn new(config: HarnessConfig, benchmark: B) -> Self {
        Self::with_clock(config, benchmark, StopWatch::default())
    }
}

impl<B: Benchmark, C: Clock> Profiler<B, C> {
    /// Create a profiler with a custom clock
    pub fn with_clock(config: HarnessConfig, benchmark: B, clock: C) -> Self {
        Self {
            config,
            benchmark,
            clock,
            analytics: Analytics::default(),
            last_run: None,
        }
    }

    /// Execute one full profiling run.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::Config`] if the configuration is invalid; nothing runs.
    /// - [`ProfileError::Benchmark`] if a hook or the workload fails.
    /// - [`HarnessError::ClockAnomaly`] if the clock reports a negative or
    ///   non-finite cycle.
    ///
    /// On error no statistics are committed: the analytics are reset.
    #[instrument(
        skip(self),
        fields(
            iterations = self.config.iterations,
            iterations_per_cycle = self.config.iterations_per_cycle,
            warm_up_iterations = self.config.warm_up_iterations
        )
    )]
    pub fn profile(&mut self) -> Result<(), ProfileError> {
        self.last_run = None;
        self.config.validate()?;

        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        info!("Starting profiling run");

        if let Err(e) = self.run_phases() {
            warn!("Profiling run aborted: {}", e);
            self.analytics.reset(self.config.iterations);
            return Err(e);
        }

        let total_duration_ms = start_time.elapsed().as_millis() as u64;
        self.last_run = Some(RunInfo {
            started_at,
            total_duration_ms,
        });

        let scale = self.analytics.time_scale();
        info!(
            "Profiling run completed in {}ms: mean {:.3} {}, median {:.3} {}",
            total_duration_ms,
            self.analytics.mean(),
            scale,
            self.analytics.median(),
            scale
        );
        Ok(())
    }

    fn run_phases(&mut self) -> Result<(), ProfileError> {
        self.on_start()?;
        self.warm_up()?;
        self.measure()?;
        self.on_end()
    }

    fn on_start(&mut self) -> Result<(), ProfileError> {
        self.analytics.reset(self.config.iterations);
        self.benchmark.on_start().map_err(ProfileError::Benchmark)
    }

    fn warm_up(&mut self) -> Result<(), ProfileError> {
        for _ in 0..self.config.warm_up_iterations {
            self.benchmark.run_once().map_err(ProfileError::Benchmark)?;
        }
        debug!("Warm-up complete");
        Ok(())
    }

    fn measure(&mut self) -> Result<(), ProfileError> {
        let per_cycle = self.config.iterations_per_cycle;

        for _ in 0..self.config.iterations {
            self.clock.start();
            for _ in 0..per_cycle {
                self.benchmark.run_once().map_err(ProfileError::Benchmark)?;
            }
            self.clock.stop();

            let elapsed = self.clock.elapsed_nanos();
            if !elapsed.is_finite() || elapsed < 0.0 {
                return Err(HarnessError::ClockAnomaly(elapsed).into());
            }
            self.analytics.register(elapsed / per_cycle as f64)?;
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<(), ProfileError> {
        self.analytics.compute_analytics()?;
        debug!(samples = self.analytics.len(), "Analytics computed");
        self.benchmark.on_end().map_err(ProfileError::Benchmark)
    }

    /// Run the workload exactly once between the tool's start/stop markers.
    ///
    /// No timing or statistics are involved. With
    /// [`Unavailable`](crate::instrument::Unavailable) this panics.
    ///
    /// For callgrind, run the binary under
    /// `valgrind --tool=callgrind --instr-atstart=no` and wire the markers to
    /// the client requests: `CALLGRIND_START_INSTRUMENTATION` in the start
    /// callback; `CALLGRIND_STOP_INSTRUMENTATION` followed by
    /// `CALLGRIND_DUMP_STATS` in the stop callback. Inspect the output with
    /// kcachegrind.
    #[instrument(skip(self, tool))]
    pub fn instrument<I: Instrumentation>(&mut self, tool: &mut I) -> Result<(), ProfileError> {
        if !tool.is_available() {
            warn!("Instrumenting without a profiling tool attached");
        }

        tool.start();
        let result = self.benchmark.run_once().map_err(ProfileError::Benchmark);
        tool.stop();

        debug!("Instrumented call finished");
        result
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn benchmark(&self) -> &B {
        &self.benchmark
    }

    pub fn benchmark_mut(&mut self) -> &mut B {
        &mut self.benchmark
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Statistics of the last successful run, in display units
    pub fn summary(&self) -> Option<Summary> {
        self.analytics.summary()
    }

    /// Exportable report of the last successful run
    pub fn report(&self, label: impl Into<String>) -> Option<Report> {
        let run = self.last_run.as_ref()?;
        Some(Report {
            label: label.into(),
            started_at: run.started_at.clone(),
            total_duration_ms: run.total_duration_ms,
            config: self.config,
            summary: self.summary()?,
        })
    }
}
