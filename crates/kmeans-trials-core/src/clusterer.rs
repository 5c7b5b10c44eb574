//! Best-of-N k-means: run several randomized trials, keep the tightest.
//!
//! A degenerate run (some cluster emptied) is discarded and retried; it does
//! not count as a trial. Among successful trials the partition with the
//! lowest dissimilarity wins, and the first one found wins ties.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::algorithms::validate_input;
use crate::config::KMeansConfig;
use crate::error::{ClusterError, ClusterResult};
use crate::kmeans::kmeans;
use crate::partition::Partition;
use crate::vector::FeatureVector;

/// Something that partitions a set of feature vectors.
pub trait Clusterer {
    /// Partition `vectors`.
    ///
    /// # Errors
    ///
    /// Input and configuration errors are fatal. Implementations must not
    /// surface `ClusterError::DegeneratePartition`.
    fn cluster(&mut self, vectors: &[FeatureVector]) -> ClusterResult<Partition>;
}

/// Best partition over `num_trials` successful runs.
///
/// Uses [`crate::config::DEFAULT_MAX_DEGENERATE_RUNS`] as the retry budget.
///
/// # Errors
///
/// See [`best_of_with_config`].
pub fn best_of<R: Rng + ?Sized>(
    vectors: &[FeatureVector],
    k: usize,
    num_trials: usize,
    rng: &mut R,
) -> ClusterResult<Partition> {
    let config = KMeansConfig::default()
        .with_k(k)
        .with_num_trials(num_trials);
    best_of_with_config(vectors, &config, rng)
}

/// Best partition over `config.num_trials` successful runs.
///
/// # Errors
///
/// - `ClusterError::EmptyInput`, `InsufficientVectors`, `DimensionMismatch`,
///   `NonFiniteFeature` for unusable input
/// - `ClusterError::InvalidConfig` if `config` fails validation
/// - `ClusterError::ClusteringExhausted` once more than
///   `config.max_degenerate_runs` runs have degenerated
pub fn best_of_with_config<R: Rng + ?Sized>(
    vectors: &[FeatureVector],
    config: &KMeansConfig,
    rng: &mut R,
) -> ClusterResult<Partition> {
    validate_input(vectors, config.k)?;
    config.validate()?;

    let mut best: Option<(Partition, f64)> = None;
    let mut completed = 0;
    let mut degenerate_runs = 0;

    while completed < config.num_trials {
        let partition = match kmeans(vectors, config.k, rng) {
            Ok(partition) => partition,
            Err(e) if e.is_degenerate() => {
                degenerate_runs += 1;
                debug!(degenerate_runs, completed, error = %e, "Discarding degenerate run");
                if degenerate_runs > config.max_degenerate_runs {
                    warn!(
                        k = config.k,
                        degenerate_runs, completed, "Giving up on degenerate runs"
                    );
                    return Err(ClusterError::ClusteringExhausted {
                        degenerate_runs,
                        completed_trials: completed,
                        requested_trials: config.num_trials,
                    });
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        completed += 1;
        let score = partition.dissimilarity();
        debug!(trial = completed, dissimilarity = score, "Trial completed");

        let improved = best.as_ref().map_or(true, |(_, best_score)| score < *best_score);
        if improved {
            best = Some((partition, score));
        }
    }

    let (partition, score) =
        best.ok_or_else(|| ClusterError::invalid_config("num_trials must be > 0"))?;
    info!(
        k = config.k,
        trials = completed,
        degenerate_runs,
        dissimilarity = %format!("{:.4}", score),
        "Selected best partition"
    );
    Ok(partition)
}

/// Parallel best-of-N over the rayon pool.
///
/// Trial `i` draws from its own `ChaCha8Rng` seeded with `base_seed + i` and
/// retries its own degenerate runs. Results are reduced in trial order, so
/// for a fixed `base_seed` the outcome does not depend on scheduling.
///
/// # Errors
///
/// Same as [`best_of_with_config`], except the degenerate budget applies
/// per trial slot.
pub fn best_of_parallel(
    vectors: &[FeatureVector],
    config: &KMeansConfig,
    base_seed: u64,
) -> ClusterResult<Partition> {
    validate_input(vectors, config.k)?;
    config.validate()?;

    let outcomes: Vec<ClusterResult<(Partition, usize)>> = (0..config.num_trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(trial as u64));
            run_until_success(vectors, config, &mut rng)
        })
        .collect();

    let completed = outcomes.iter().filter(|o| o.is_ok()).count();
    let mut best: Option<(Partition, f64)> = None;
    let mut degenerate_total = 0;

    for outcome in outcomes {
        let (partition, degenerate_runs) = match outcome {
            Ok(ok) => ok,
            Err(ClusterError::ClusteringExhausted {
                degenerate_runs, ..
            }) => {
                warn!(k = config.k, degenerate_runs, completed, "Trial slot exhausted");
                return Err(ClusterError::ClusteringExhausted {
                    degenerate_runs,
                    completed_trials: completed,
                    requested_trials: config.num_trials,
                });
            }
            Err(e) => return Err(e),
        };
        degenerate_total += degenerate_runs;

        let score = partition.dissimilarity();
        let improved = best.as_ref().map_or(true, |(_, best_score)| score < *best_score);
        if improved {
            best = Some((partition, score));
        }
    }

    let (partition, score) =
        best.ok_or_else(|| ClusterError::invalid_config("num_trials must be > 0"))?;
    info!(
        k = config.k,
        trials = completed,
        degenerate_runs = degenerate_total,
        dissimilarity = %format!("{:.4}", score),
        "Selected best partition (parallel)"
    );
    Ok(partition)
}

/// Retry one trial slot until a run converges or the budget runs out.
fn run_until_success<R: Rng + ?Sized>(
    vectors: &[FeatureVector],
    config: &KMeansConfig,
    rng: &mut R,
) -> ClusterResult<(Partition, usize)> {
    let mut degenerate_runs = 0;
    loop {
        match kmeans(vectors, config.k, rng) {
            Ok(partition) => return Ok((partition, degenerate_runs)),
            Err(e) if e.is_degenerate() => {
                degenerate_runs += 1;
                if degenerate_runs > config.max_degenerate_runs {
                    return Err(ClusterError::ClusteringExhausted {
                        degenerate_runs,
                        completed_trials: 0,
                        requested_trials: 1,
                    });
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Configured best-of-N clusterer with its own reproducible RNG.
///
/// # Example
///
/// ```
/// use kmeans_trials_core::{Clusterer, FeatureVector, KMeansConfig, KMeansTrials};
///
/// let vectors = vec![
///     FeatureVector::new("a", vec![0.0, 0.0], 0.0),
///     FeatureVector::new("b", vec![0.0, 0.1], 0.0),
///     FeatureVector::new("c", vec![10.0, 10.0], 1.0),
///     FeatureVector::new("d", vec![10.0, 10.1], 1.0),
/// ];
/// let config = KMeansConfig::new(2, 3).unwrap().with_seed(7);
/// let mut clusterer = KMeansTrials::new(config).unwrap();
///
/// let partition = clusterer.cluster(&vectors).unwrap();
/// assert_eq!(partition.len(), 2);
/// assert_eq!(partition.total_points(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct KMeansTrials {
    config: KMeansConfig,
    rng: ChaCha8Rng,
}

impl KMeansTrials {
    /// Create a clusterer. Seeds from `config.seed`, or OS entropy if unset.
    ///
    /// # Errors
    ///
    /// See [`KMeansConfig::validate`].
    pub fn new(config: KMeansConfig) -> ClusterResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    #[inline]
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

impl Clusterer for KMeansTrials {
    fn cluster(&mut self, vectors: &[FeatureVector]) -> ClusterResult<Partition> {
        if self.config.parallel {
            let base_seed = self.rng.gen::<u64>();
            best_of_parallel(vectors, &self.config, base_seed)
        } else {
            best_of_with_config(vectors, &self.config, &mut self.rng)
        }
    }
}
