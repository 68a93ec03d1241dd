//! Monotonic timing for measurement cycles
//!
//! The profiler only needs three operations from a clock, captured by the
//! [`Clock`] trait. [`StopWatch`] implements it on top of
//! [`std::time::Instant`], which is monotonic and unaffected by wall-clock
//! adjustments.

use std::fmt;
use std::time::Instant;

/// Timing capability consumed by the profiler.
///
/// `elapsed_nanos` must never be negative once `stop` has followed `start`.
pub trait Clock {
    fn start(&mut self);
    fn stop(&mut self);
    fn elapsed_nanos(&self) -> f64;
}

/// High-resolution stopwatch over the platform's monotonic clock.
///
/// # Example
///
/// ```
/// use perf_harness::clock::StopWatch;
///
/// let mut stopwatch = StopWatch::new(true);
/// let total: u64 = (0..1_000).sum();
/// stopwatch.stop();
///
/// assert_eq!(total, 499_500);
/// assert!(stopwatch.nanos() >= 0.0);
/// println!("summed in {}", stopwatch);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    start: Instant,
    end: Instant,
}

impl StopWatch {
    /// Create a stopwatch, optionally starting it immediately.
    pub fn new(start_now: bool) -> Self {
        let now = Instant::now();
        let mut stopwatch = Self { start: now, end: now };
        if start_now {
            stopwatch.start();
        }
        stopwatch
    }

    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn stop(&mut self) {
        self.end = Instant::now();
    }

    /// Zero the reading and start timing again.
    pub fn reset(&mut self) {
        self.start();
        self.end = self.start;
    }

    /// Elapsed time between the last `start` and `stop`.
    ///
    /// Negative when `stop` was last called before `start`, so callers can
    /// spot a misused stopwatch instead of reading a clamped zero.
    pub fn nanos(&self) -> f64 {
        match self.end.checked_duration_since(self.start) {
            Some(elapsed) => elapsed.as_nanos() as f64,
            None => -(self.start.duration_since(self.end).as_nanos() as f64),
        }
    }

    pub fn micros(&self) -> f64 {
        self.nanos() * 1e-3
    }

    pub fn millis(&self) -> f64 {
        self.nanos() * 1e-6
    }

    pub fn seconds(&self) -> f64 {
        self.nanos() * 1e-9
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Clock for StopWatch {
    #[inline]
    fn start(&mut self) {
        StopWatch::start(self);
    }

    #[inline]
    fn stop(&mut self) {
        StopWatch::stop(self);
    }

    #[inline]
    fn elapsed_nanos(&self) -> f64 {
        self.nanos()
    }
}

impl fmt::Display for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.nanos();
        if ns < 1e3 {
            write!(f, "{}ns", ns)
        } else if ns < 1e6 {
            write!(f, "{}us", ns * 1e-3)
        } else if ns < 1e9 {
            write!(f, "{}ms", ns * 1e-6)
        } else {
            write!(f, "{}s", ns * 1e-9)
        }
    }
}
