//! Configuration for the multi-trial k-means driver.
//!
//! # TOML Structure
//!
//! ```toml
//! k = 4
//! num_trials = 20
//! max_degenerate_runs = 1000
//! seed = 42
//! parallel = false
//! ```
//!
//! Every key is optional; missing keys take their default.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

/// Default cluster count.
pub const DEFAULT_K: usize = 2;

/// Default number of successful trials.
pub const DEFAULT_NUM_TRIALS: usize = 1;

/// Default number of degenerate runs tolerated per driver call.
pub const DEFAULT_MAX_DEGENERATE_RUNS: usize = 1000;

/// Configuration for best-of-N k-means.
///
/// # Validation
///
/// `validate()` rejects k == 0 and num_trials == 0. Whether k fits the data
/// is checked against the input at clustering time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,

    /// Successful runs to compare. Degenerate runs do not count.
    pub num_trials: usize,

    /// Degenerate runs tolerated before giving up with
    /// `ClusterError::ClusteringExhausted`. In parallel mode the budget
    /// applies to each trial slot.
    pub max_degenerate_runs: usize,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Run trials on the rayon thread pool.
    pub parallel: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            num_trials: DEFAULT_NUM_TRIALS,
            max_degenerate_runs: DEFAULT_MAX_DEGENERATE_RUNS,
            seed: None,
            parallel: false,
        }
    }
}

impl KMeansConfig {
    /// Create a validated configuration with default retry policy.
    ///
    /// # Errors
    ///
    /// See [`KMeansConfig::validate`].
    pub fn new(k: usize, num_trials: usize) -> ClusterResult<Self> {
        let config = Self {
            k,
            num_trials,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    #[must_use]
    pub fn with_max_degenerate_runs(mut self, max_degenerate_runs: usize) -> Self {
        self.max_degenerate_runs = max_degenerate_runs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate parameter values.
    ///
    /// # Errors
    ///
    /// - `ClusterError::EmptyInput` if k == 0
    /// - `ClusterError::InvalidConfig` if num_trials == 0
    pub fn validate(&self) -> ClusterResult<()> {
        if self.k == 0 {
            return Err(ClusterError::empty_input("k must be > 0"));
        }
        if self.num_trials == 0 {
            return Err(ClusterError::invalid_config("num_trials must be > 0"));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// The loaded values are not validated; call [`KMeansConfig::validate`].
    ///
    /// # Errors
    ///
    /// `ClusterError::InvalidConfig` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ClusterResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClusterError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ClusterError::invalid_config(format!(
                "Failed to parse TOML in '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply environment variable overrides. Prefix: `KMEANS_`
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `KMEANS_K` | `k` |
    /// | `KMEANS_TRIALS` | `num_trials` |
    /// | `KMEANS_MAX_DEGENERATE_RUNS` | `max_degenerate_runs` |
    /// | `KMEANS_SEED` | `seed` |
    /// | `KMEANS_PARALLEL` | `parallel` |
    ///
    /// Values that fail to parse are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(k) = Self::env_k() {
            self.k = k;
        }
        if let Some(n) = env_parse::<usize>("KMEANS_TRIALS") {
            self.num_trials = n;
        }
        if let Some(n) = env_parse::<usize>("KMEANS_MAX_DEGENERATE_RUNS") {
            self.max_degenerate_runs = n;
        }
        if let Some(seed) = env_parse::<u64>("KMEANS_SEED") {
            self.seed = Some(seed);
        }
        if let Some(parallel) = env_parse::<bool>("KMEANS_PARALLEL") {
            self.parallel = parallel;
        }
        self
    }

    /// The cluster count from `KMEANS_K`, if set and parsable.
    ///
    /// Exactly the value [`KMeansConfig::with_env_overrides`] applies.
    pub fn env_k() -> Option<usize> {
        env_parse("KMEANS_K")
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
