//! Compare sorting strategies on freshly randomized vectors
//!
//! Usage: cargo run -p perf-harness --example sort_containers --release
//!
//! Prints one matplotlib script per strategy; the last one opens the window.

use anyhow::Result;
use perf_harness::reporter::{OutputFormat, Reporter};
use perf_harness::{Benchmark, HarnessConfig, Profiler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CONTAINER_SIZE: usize = 512;

type Action = fn(&mut Vec<f64>, &mut StdRng);

struct ContainerBench {
    container: Vec<f64>,
    rng: StdRng,
    action: Action,
}

impl Benchmark for ContainerBench {
    fn run_once(&mut self) -> Result<()> {
        (self.action)(&mut self.container, &mut self.rng);
        Ok(())
    }
}

fn fill(container: &mut [f64], rng: &mut StdRng) {
    for slot in container.iter_mut() {
        *slot = rng.gen::<f64>();
    }
}

fn stable_sort(container: &mut Vec<f64>, rng: &mut StdRng) {
    fill(container, rng);
    container.sort_by(f64::total_cmp);
}

fn unstable_sort(container: &mut Vec<f64>, rng: &mut StdRng) {
    fill(container, rng);
    container.sort_unstable_by(f64::total_cmp);
}

fn partial_cmp_sort(container: &mut Vec<f64>, rng: &mut StdRng) {
    fill(container, rng);
    container.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = HarnessConfig::new(10_000)
        .with_iterations_per_cycle(5)
        .with_warm_up_iterations(10);

    let strategies: [(&str, Action); 3] = [
        ("STABLE", stable_sort),
        ("UNSTABLE", unstable_sort),
        ("PARTIAL CMP", partial_cmp_sort),
    ];

    let mut profiler = Profiler::new(
        config,
        ContainerBench {
            container: vec![0.0; CONTAINER_SIZE],
            rng: StdRng::from_entropy(),
            action: stable_sort,
        },
    );

    for (i, (name, action)) in strategies.iter().enumerate() {
        profiler.benchmark_mut().action = *action;
        profiler.profile()?;

        let label = format!("{} - {}", name, CONTAINER_SIZE);
        if let Some(report) = profiler.report(label) {
            Reporter::new(OutputFormat::PythonPlot)
                .with_plot_window(i + 1 == strategies.len())
                .report(&report)?;
        }
    }

    Ok(())
}
