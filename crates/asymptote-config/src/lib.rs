//! Configuration system for Asymptote.
//!
//! Load benchmark configuration from TOML or YAML files to control requested
//! sizes, trial counts and time budgets without code changes. Every default
//! that a benchmark relies on lives in [`BenchmarkConfig`] and is passed
//! explicitly into the runner.
//!
//! # Examples
//!
//! Load a single series from a TOML string:
//!
//! ```
//! use asymptote_config::BenchmarkConfig;
//! use std::time::Duration;
//!
//! let config = BenchmarkConfig::from_toml_str(r#"
//!     name = "Subset Sum (Backtracking)"
//!     sizes = [10, 15, 20, 25, 30]
//!
//!     [trials]
//!     baseline = 10
//!     reductions = [
//!         { from_size = 25, trials = 3 },
//!         { from_size = 30, trials = 1 },
//!     ]
//!
//!     [limits]
//!     trial_timeout_secs = 120
//!     series_timeout_secs = 300
//! "#).unwrap();
//!
//! assert_eq!(config.trial_timeout(), Some(Duration::from_secs(120)));
//! assert_eq!(config.trials.reductions.len(), 2);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use the built-in suite when the file is missing:
//!
//! ```
//! use asymptote_config::SuiteConfig;
//!
//! let suite = SuiteConfig::load("asymptote.toml").unwrap_or_default();
//! assert_eq!(suite.output_dir, "results");
//! ```

use std::path::Path;
use std::time::Duration;

use asymptote_core::{AsymptoteError, ProblemSize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for AsymptoteError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => AsymptoteError::Io(io),
            other => AsymptoteError::Usage(other.to_string()),
        }
    }
}

/// Configuration of one benchmark series: one subject over a sequence of sizes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchmarkConfig {
    /// Series name, used in logs and report titles.
    pub name: String,

    /// Requested problem sizes, strictly increasing.
    #[serde(default)]
    pub sizes: Vec<usize>,

    /// Trial-count policy.
    #[serde(default)]
    pub trials: TrialPolicy,

    /// Per-trial and series-level time budgets.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Unmeasured calls before the first measured trial of the series.
    #[serde(default)]
    pub warmup_count: usize,

    /// Random seed for reproducible instance generation.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl BenchmarkConfig {
    /// Creates a configuration with the given name and no sizes.
    ///
    /// Defaults:
    /// - trials: 3 per size, no reductions
    /// - limits: none
    /// - warmup_count: 0
    ///
    /// # Example
    ///
    /// ```
    /// use asymptote_config::BenchmarkConfig;
    ///
    /// let config = BenchmarkConfig::new("Dijkstra").with_sizes([10, 50, 100]);
    /// assert_eq!(config.trials.baseline, 3);
    /// assert_eq!(config.sizes, vec![10, 50, 100]);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sizes: Vec::new(),
            trials: TrialPolicy::default(),
            limits: LimitsConfig::default(),
            warmup_count: 0,
            random_seed: None,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the requested sizes.
    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    /// Sets the baseline number of trials per size.
    pub fn with_baseline_trials(mut self, trials: usize) -> Self {
        self.trials.baseline = trials;
        self
    }

    /// Adds a trial reduction applying from `from_size` upwards.
    pub fn with_reduction(mut self, from_size: usize, trials: usize) -> Self {
        self.trials.reductions.push(TrialReduction { from_size, trials });
        self
    }

    /// Sets the per-trial ceiling.
    pub fn with_trial_timeout(mut self, timeout: Duration) -> Self {
        self.limits.trial_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    /// Sets the series-level ceiling on a size's average duration.
    pub fn with_series_timeout(mut self, timeout: Duration) -> Self {
        self.limits.series_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    /// Sets the number of warmup calls.
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Returns the per-trial ceiling, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use asymptote_config::BenchmarkConfig;
    /// use std::time::Duration;
    ///
    /// let config = BenchmarkConfig::new("Test").with_trial_timeout(Duration::from_millis(250));
    /// assert_eq!(config.trial_timeout(), Some(Duration::from_millis(250)));
    /// assert_eq!(config.series_timeout(), None);
    /// ```
    pub fn trial_timeout(&self) -> Option<Duration> {
        self.limits.trial_timeout()
    }

    /// Returns the series-level ceiling, if configured.
    pub fn series_timeout(&self) -> Option<Duration> {
        self.limits.series_timeout()
    }

    /// Checks the configuration for usage errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty size list, a zero or
    /// non-increasing size, a zero trial count, or a non-positive timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.requested_sizes().map(|_| ())
    }

    /// Validates the configuration and returns the requested sizes.
    ///
    /// # Examples
    ///
    /// ```
    /// use asymptote_config::BenchmarkConfig;
    ///
    /// let config = BenchmarkConfig::new("Test").with_sizes([5, 10]);
    /// let sizes = config.requested_sizes().unwrap();
    /// assert_eq!(sizes[1].get(), 10);
    ///
    /// assert!(BenchmarkConfig::new("Empty").requested_sizes().is_err());
    /// ```
    pub fn requested_sizes(&self) -> Result<Vec<ProblemSize>, ConfigError> {
        if self.sizes.is_empty() {
            return Err(invalid(&self.name, "requested size list is empty"));
        }

        let mut sizes = Vec::with_capacity(self.sizes.len());
        for &n in &self.sizes {
            let size = ProblemSize::new(n)
                .ok_or_else(|| invalid(&self.name, "problem sizes must be positive"))?;
            if sizes.last().is_some_and(|prev: &ProblemSize| *prev >= size) {
                return Err(invalid(
                    &self.name,
                    &format!("sizes must be strictly increasing (got {n} after a size >= {n})"),
                ));
            }
            sizes.push(size);
        }

        self.trials.validate().map_err(|msg| invalid(&self.name, &msg))?;
        self.limits.validate().map_err(|msg| invalid(&self.name, &msg))?;
        Ok(sizes)
    }
}

fn invalid(name: &str, msg: &str) -> ConfigError {
    ConfigError::Invalid(format!("{name}: {msg}"))
}

/// Trial-count policy: a baseline, reduced once sizes cross expensive thresholds.
///
/// The reduction with the largest `from_size` not exceeding the requested size
/// applies; sizes below every threshold run `baseline` trials.
///
/// # Example
///
/// ```
/// use asymptote_config::{TrialPolicy, TrialReduction};
/// use asymptote_core::ProblemSize;
///
/// let policy = TrialPolicy {
///     baseline: 10,
///     reductions: vec![
///         TrialReduction { from_size: 24, trials: 3 },
///         TrialReduction { from_size: 28, trials: 1 },
///     ],
/// };
///
/// let size = |n| ProblemSize::new(n).unwrap();
/// assert_eq!(policy.trials_for(size(20)), 10);
/// assert_eq!(policy.trials_for(size(24)), 3);
/// assert_eq!(policy.trials_for(size(30)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TrialPolicy {
    /// Trials per size below every reduction threshold.
    pub baseline: usize,

    /// Size thresholds at which the trial count drops.
    #[serde(default)]
    pub reductions: Vec<TrialReduction>,
}

impl TrialPolicy {
    /// Creates a policy with a fixed trial count.
    pub fn fixed(trials: usize) -> Self {
        Self {
            baseline: trials,
            reductions: Vec::new(),
        }
    }

    /// Returns the number of trials to run at `size`.
    pub fn trials_for(&self, size: ProblemSize) -> usize {
        self.reductions
            .iter()
            .filter(|r| r.from_size <= size.get())
            .max_by_key(|r| r.from_size)
            .map_or(self.baseline, |r| r.trials)
    }

    fn validate(&self) -> Result<(), String> {
        if self.baseline == 0 {
            return Err("baseline trial count must be at least 1".to_string());
        }
        for r in &self.reductions {
            if r.trials == 0 {
                return Err(format!(
                    "trial reduction from size {} must keep at least 1 trial",
                    r.from_size
                ));
            }
            if r.from_size == 0 {
                return Err("trial reduction threshold must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl Default for TrialPolicy {
    fn default() -> Self {
        Self::fixed(3)
    }
}

/// One step of a [`TrialPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TrialReduction {
    /// Smallest size this reduction applies to.
    pub from_size: usize,

    /// Trials per size from `from_size` upwards.
    pub trials: usize,
}

/// Time budgets for a series.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LimitsConfig {
    /// A trial longer than this stops further trials at its size.
    pub trial_timeout_secs: Option<f64>,

    /// A size whose average exceeds this ends the series.
    pub series_timeout_secs: Option<f64>,
}

impl LimitsConfig {
    /// Returns the per-trial ceiling as a Duration, if any.
    pub fn trial_timeout(&self) -> Option<Duration> {
        self.trial_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Returns the series ceiling as a Duration, if any.
    pub fn series_timeout(&self) -> Option<Duration> {
        self.series_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("trial_timeout_secs", self.trial_timeout_secs),
            ("series_timeout_secs", self.series_timeout_secs),
        ] {
            if let Some(secs) = value {
                if !secs.is_finite() || secs <= 0.0 {
                    return Err(format!("{field} must be a positive number of seconds"));
                }
            }
        }
        Ok(())
    }
}

/// Configuration of the full benchmark suite run by the command line tool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SuiteConfig {
    /// Directory receiving reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Seed applied to every series that does not set its own.
    #[serde(default = "default_seed")]
    pub random_seed: Option<u64>,

    /// Subset sum, backtracking with pruning.
    #[serde(default = "BenchmarkConfig::backtracking")]
    pub backtracking: BenchmarkConfig,

    /// Subset sum, dynamic programming.
    #[serde(default = "BenchmarkConfig::dynamic_programming")]
    pub dynamic_programming: BenchmarkConfig,

    /// Subset sum, exhaustive search over adversarial instances.
    #[serde(default = "BenchmarkConfig::worst_case")]
    pub worst_case: BenchmarkConfig,

    /// Dijkstra over random dense graphs.
    #[serde(default = "BenchmarkConfig::shortest_path")]
    pub shortest_path: BenchmarkConfig,
}

fn default_output_dir() -> String {
    "results".to_string()
}

fn default_seed() -> Option<u64> {
    Some(42)
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            random_seed: default_seed(),
            backtracking: BenchmarkConfig::backtracking(),
            dynamic_programming: BenchmarkConfig::dynamic_programming(),
            worst_case: BenchmarkConfig::worst_case(),
            shortest_path: BenchmarkConfig::shortest_path(),
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Returns `series` with the suite seed filled in when it has none.
    pub fn seeded(&self, series: &BenchmarkConfig) -> BenchmarkConfig {
        let mut config = series.clone();
        if config.random_seed.is_none() {
            config.random_seed = self.random_seed;
        }
        config
    }

    /// Validates every series in the suite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backtracking.validate()?;
        self.dynamic_programming.validate()?;
        self.worst_case.validate()?;
        self.shortest_path.validate()
    }
}

/// Built-in series presets.
impl BenchmarkConfig {
    /// Subset sum by backtracking over near-equal values.
    pub fn backtracking() -> Self {
        Self::new("Subset Sum (Backtracking)")
            .with_sizes([10, 15, 20, 22, 24, 26, 28, 30])
            .with_baseline_trials(10)
            .with_reduction(26, 3)
            .with_reduction(30, 1)
            .with_trial_timeout(Duration::from_secs(120))
            .with_series_timeout(Duration::from_secs(300))
    }

    /// Subset sum by dynamic programming over random values.
    pub fn dynamic_programming() -> Self {
        Self::new("Subset Sum (Dynamic Programming)")
            .with_sizes([5, 10, 20, 50, 100, 200, 500, 1000])
            .with_baseline_trials(10)
            .with_reduction(500, 3)
            .with_trial_timeout(Duration::from_secs(120))
            .with_series_timeout(Duration::from_secs(300))
    }

    /// Subset sum by exhaustive search over prime instances with an impossible target.
    pub fn worst_case() -> Self {
        Self::new("Subset Sum (Worst Case)")
            .with_sizes([10, 12, 15, 18, 20, 21, 22, 23])
            .with_baseline_trials(5)
            .with_reduction(20, 3)
            .with_reduction(22, 1)
            .with_trial_timeout(Duration::from_secs(120))
            .with_series_timeout(Duration::from_secs(300))
    }

    /// Dijkstra over random graphs with edge probability 0.5.
    pub fn shortest_path() -> Self {
        Self::new("Dijkstra's Shortest Path")
            .with_sizes([10, 50, 100, 200, 500, 1000, 1500, 2000])
            .with_baseline_trials(3)
            .with_trial_timeout(Duration::from_secs(600))
            .with_series_timeout(Duration::from_secs(900))
    }
}

#[cfg(test)]
mod tests;
