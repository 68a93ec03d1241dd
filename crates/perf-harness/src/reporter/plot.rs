//! Matplotlib script generation
//!
//! The generated script plots percentile rank against value and, optionally,
//! a histogram of the raw observations next to it.

use anyhow::Result;
use std::fmt::Write;

use crate::stats::Summary;

/// Python plotting-script reporter
pub struct PlotReporter;

impl PlotReporter {
    /// Build a matplotlib script for a summary.
    ///
    /// # Arguments
    ///
    /// * `summary` - Statistics to plot, in their display unit
    /// * `label` - Legend label for the percentile curve
    /// * `include_observations` - Add a histogram subplot of raw observations
    /// * `show` - End with `plt.show()`
    pub fn format(
        summary: &Summary,
        label: &str,
        include_observations: bool,
        show: bool,
    ) -> Result<String> {
        let ranks: Vec<f64> = summary.percentiles.iter().map(|entry| entry.rank).collect();
        let values: Vec<f64> = summary.percentiles.iter().map(|entry| entry.value).collect();
        let label = escape_python(label);

        let mut script = String::new();
        writeln!(script, "import matplotlib.pyplot as plt")?;
        writeln!(script, "import numpy as np")?;
        writeln!(script, "percentiles = {}", python_list(&ranks))?;
        writeln!(script, "percentileValues = {}", python_list(&values))?;

        if include_observations {
            writeln!(script, "observations = {}", python_list(&summary.observations))?;
            writeln!(script, "fig = plt.figure(1)")?;
            writeln!(script, "ax = fig.add_subplot(121)")?;
            writeln!(
                script,
                "n, bins, patches = ax.hist(x=observations, bins='auto', color='#0504aa', alpha=0.7)"
            )?;
            writeln!(script, "ax.grid(alpha=0.75)")?;
            writeln!(script, "ax.set_xlabel('{}')", summary.scale)?;
            writeln!(script, "max_freq = n.max()")?;
            writeln!(
                script,
                "ax.set_ylim(ymax=np.ceil(max_freq / 10) * 10 if max_freq % 10 else max_freq + 10)"
            )?;
            writeln!(script, "ax = fig.add_subplot(122)")?;
            writeln!(script, "ax.plot(percentiles, percentileValues, label='{}')", label)?;
            writeln!(script, "ax.grid(alpha=0.75)")?;
            writeln!(script, "ax.legend(loc='best')")?;
        } else {
            writeln!(script, "fig = plt.figure(1)")?;
            writeln!(script, "ax = fig.add_subplot(111)")?;
            writeln!(script, "ax.plot(percentiles, percentileValues, label='{}')", label)?;
            writeln!(script, "ax.grid(alpha=0.75)")?;
            writeln!(script, "ax.legend(loc='lower right')")?;
        }
        writeln!(script, "ax.set_ylabel('{}')", summary.scale)?;

        if show {
            writeln!(script, "plt.show()")?;
        }

        Ok(script)
    }
}

fn python_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn escape_python(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
