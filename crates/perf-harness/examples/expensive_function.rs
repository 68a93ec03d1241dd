//! Profile a chain of dependent exponentials
//!
//! Usage: cargo run -p perf-harness --example expensive_function --release [-- <config.toml>]
//!
//! Run under `valgrind --tool=callgrind --instr-atstart=no` with
//! `PERF_HARNESS_INSTRUMENT=1` to also capture one instrumented call.

use anyhow::Result;
use perf_harness::instrument::Markers;
use perf_harness::reporter::{average_line, OutputFormat, Reporter};
use perf_harness::{Benchmark, HarnessConfig, Profiler};
use std::env;

const CACHE_SIZE: usize = 1000;

fn expensive_function(cache: &mut [f64; CACHE_SIZE], seed: f64) {
    cache[0] = 1.0;
    for i in 1..cache.len() {
        cache[i] = (-(seed * cache[i - 1]).abs()).exp();
    }
}

struct ExpChain {
    cache: [f64; CACHE_SIZE],
    seed: f64,
    verbose: bool,
}

impl ExpChain {
    fn new(seed: f64, verbose: bool) -> Self {
        Self {
            cache: [0.0; CACHE_SIZE],
            seed,
            verbose,
        }
    }
}

impl Benchmark for ExpChain {
    fn on_start(&mut self) -> Result<()> {
        if self.verbose {
            println!("starting...");
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        if self.verbose {
            println!("done!");
        }
        Ok(())
    }

    fn run_once(&mut self) -> Result<()> {
        self.cache.fill(0.0);
        expensive_function(&mut self.cache, self.seed);
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Short run, full console report
    let config = HarnessConfig::new(10);
    let mut profiler = Profiler::new(config, ExpChain::new(1.0, true));
    profiler.profile()?;
    if let Some(report) = profiler.report("exp chain, seed 1.0") {
        Reporter::new(OutputFormat::Console)
            .with_percentiles(true)
            .report(&report)?;
    }

    // Longer run, optionally configured from a file
    let config = match env::args().nth(1) {
        Some(path) => {
            println!("Loading config from: {}", path);
            HarnessConfig::from_file(path)?
        }
        None => HarnessConfig::new(300).with_warm_up_iterations(10),
    };
    let mut profiler = Profiler::new(config, ExpChain::new(0.1234, false));
    profiler.profile()?;

    if let Some(report) = profiler.report("exp chain, seed 0.1234") {
        println!("{}", average_line(&report.summary));
        println!();
        Reporter::new(OutputFormat::Csv)
            .with_percentiles(true)
            .report(&report)?;
        println!();
        Reporter::new(OutputFormat::PythonPlot)
            .with_observations(true)
            .with_plot_window(true)
            .report(&report)?;
    }

    if env::var_os("PERF_HARNESS_INSTRUMENT").is_some() {
        let mut markers = Markers::new(
            || eprintln!("instrumentation: start"),
            || eprintln!("instrumentation: stop"),
        );
        profiler.instrument(&mut markers)?;
    }

    Ok(())
}
