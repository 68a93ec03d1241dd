//! Single-shot instrumentation hooks for external profilers
//!
//! Tools such as callgrind collect their own data; the harness only brackets
//! one workload call with the tool's start/stop markers. Whether a tool is
//! wired in is decided by which [`Instrumentation`] the caller hands over.

use tracing::error;

/// Markers around an instrumented workload call.
pub trait Instrumentation {
    /// Whether a real profiling tool backs these markers.
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self);
    fn stop(&mut self);
}

/// No profiling tool present.
///
/// Instrumenting with it is a fatal misuse: [`Instrumentation::start`]
/// panics, which aborts the process under the release profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl Instrumentation for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self) {
        error!("Instrumentation requested but no profiling tool is attached");
        panic!("instrumentation is unavailable: no profiling tool attached");
    }

    fn stop(&mut self) {
        error!("Instrumentation requested but no profiling tool is attached");
        panic!("instrumentation is unavailable: no profiling tool attached");
    }
}

/// Instrumentation driven by caller-supplied marker callbacks.
///
/// # Example
///
/// ```
/// use perf_harness::instrument::{Instrumentation, Markers};
///
/// let mut events = Vec::new();
/// {
///     let mut markers = Markers::new(|| println!("start"), || println!("stop"));
///     markers.start();
///     events.push("work");
///     markers.stop();
/// }
/// assert_eq!(events, ["work"]);
/// ```
pub struct Markers<S, E> {
    on_start: S,
    on_stop: E,
}

impl<S, E> Markers<S, E>
where
    S: FnMut(),
    E: FnMut(),
{
    pub fn new(on_start: S, on_stop: E) -> Self {
        Self { on_start, on_stop }
    }
}

impl<S, E> Instrumentation for Markers<S, E>
where
    S: FnMut(),
    E: FnMut(),
{
    fn start(&mut self) {
        (self.on_start)();
    }

    fn stop(&mut self) {
        (self.on_stop)();
    }
}
