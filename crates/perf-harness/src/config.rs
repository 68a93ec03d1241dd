//! Configuration for profiling runs
//!
//! A [`HarnessConfig`] is built programmatically or parsed from TOML, and is
//! read-only once a [`Profiler`](crate::profiler::Profiler) owns it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Iteration counts governing one profiling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Number of timed cycles, one sample each (default: 100)
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Workload calls per timed cycle (default: 1)
    #[serde(default = "default_iterations_per_cycle")]
    pub iterations_per_cycle: usize,
    /// Untimed workload calls before measuring (default: 1)
    #[serde(default = "default_warm_up_iterations")]
    pub warm_up_iterations: usize,
}

fn default_iterations() -> usize {
    100
}

fn default_iterations_per_cycle() -> usize {
    1
}

fn default_warm_up_iterations() -> usize {
    1
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            iterations_per_cycle: default_iterations_per_cycle(),
            warm_up_iterations: default_warm_up_iterations(),
        }
    }
}

/// TOML layout with the settings under a `[harness]` table
#[derive(Deserialize)]
struct HarnessFile {
    harness: HarnessConfig,
}

impl HarnessConfig {
    /// Configuration with `iterations` timed cycles and default batching.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn with_iterations_per_cycle(mut self, iterations_per_cycle: usize) -> Self {
        self.iterations_per_cycle = iterations_per_cycle;
        self
    }

    pub fn with_warm_up_iterations(mut self, warm_up_iterations: usize) -> Self {
        self.warm_up_iterations = warm_up_iterations;
        self
    }

    /// Check the counts a run cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns an error if `iterations` or `iterations_per_cycle` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.iterations_per_cycle == 0 {
            return Err(ConfigError::ZeroIterationsPerCycle);
        }
        Ok(())
    }

    /// Load and validate configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - The counts fail [`HarnessConfig::validate`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use perf_harness::config::HarnessConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = HarnessConfig::from_file("harness.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// The settings may sit at the top level or under a `[harness]` table.
    /// Missing keys take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use perf_harness::config::HarnessConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [harness]
    ///     iterations = 10000
    ///     iterations_per_cycle = 5
    ///     warm_up_iterations = 10
    /// "#;
    /// let config = HarnessConfig::from_str(toml)?;
    /// assert_eq!(config.iterations_per_cycle, 5);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let value: toml::Value =
            toml::from_str(s).context("Failed to parse TOML configuration")?;

        let config = if value.get("harness").is_some() {
            value
                .try_into::<HarnessFile>()
                .context("Invalid [harness] section")?
                .harness
        } else {
            value
                .try_into::<HarnessConfig>()
                .context("Invalid harness configuration")?
        };

        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#Iterations           : \t{}", self.iterations)?;
        writeln!(f, "#Iterations Per Cycle : \t{}", self.iterations_per_cycle)?;
        writeln!(f, "#WarmUp Iterations    : \t{}", self.warm_up_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = HarnessConfig::from_str("").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.iterations, 100);
        assert_eq!(config.iterations_per_cycle, 1);
        assert_eq!(config.warm_up_iterations, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [harness]
            iterations = 300
            iterations_per_cycle = 5
            warm_up_iterations = 10
        "#;

        let config = HarnessConfig::from_str(toml).unwrap();
        assert_eq!(config.iterations, 300);
        assert_eq!(config.iterations_per_cycle, 5);
        assert_eq!(config.warm_up_iterations, 10);
    }

    #[test]
    fn test_parse_top_level_keys() {
        let config = HarnessConfig::from_str("iterations = 7\nwarm_up_iterations = 0").unwrap();
        assert_eq!(config.iterations, 7);
        assert_eq!(config.iterations_per_cycle, 1);
        assert_eq!(config.warm_up_iterations, 0);
    }

    #[test]
    fn test_parse_rejects_zero_iterations() {
        let err = HarnessConfig::from_str("iterations = 0").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroIterations)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(HarnessConfig::from_str("iterations = ").is_err());
        assert!(HarnessConfig::from_str("iterations = -3").is_err());
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::new(10)
            .with_iterations_per_cycle(4)
            .with_warm_up_iterations(0);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.iterations_per_cycle, 4);
        assert_eq!(config.warm_up_iterations, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            HarnessConfig::new(0).validate(),
            Err(ConfigError::ZeroIterations)
        );
        assert_eq!(
            HarnessConfig::new(1).with_iterations_per_cycle(0).validate(),
            Err(ConfigError::ZeroIterationsPerCycle)
        );
        assert!(HarnessConfig::new(1).with_warm_up_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_display() {
        let text = HarnessConfig::new(10).to_string();
        assert!(text.contains("#Iterations           : \t10"));
        assert!(text.contains("#Iterations Per Cycle : \t1"));
        assert!(text.contains("#WarmUp Iterations    : \t1"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = HarnessConfig::from_file("/nonexistent/harness.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
