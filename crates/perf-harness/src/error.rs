use thiserror::Error;

/// Invalid harness configuration, detected before any workload runs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    #[error("iterations per cycle must be at least 1")]
    ZeroIterationsPerCycle,
}

/// Failures raised by the harness itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarnessError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid sample: {0} ns (samples must be finite and non-negative)")]
    InvalidSample(f64),

    #[error("Cannot compute analytics on an empty sample set")]
    EmptySampleSet,

    #[error("Clock anomaly: measured {0} ns for a timed cycle")]
    ClockAnomaly(f64),
}

/// A percentile table that does not cover the canonical ranks exactly once.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PercentileTableError {
    #[error("Unknown percentile rank: {0}")]
    UnknownRank(f64),

    #[error("Duplicate percentile rank: {0}")]
    DuplicateRank(f64),

    #[error("Missing percentile rank: {0}")]
    MissingRank(f64),
}

/// Outcome of a failed profiling run.
///
/// Errors raised by the benchmark's own hooks are carried untouched in
/// [`ProfileError::Benchmark`] so callers can downcast them.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    Benchmark(anyhow::Error),
}

impl From<ConfigError> for ProfileError {
    fn from(err: ConfigError) -> Self {
        ProfileError::Harness(HarnessError::Config(err))
    }
}
