//! One randomized k-means run.
//!
//! # Algorithm
//!
//! 1. Seed k singleton clusters with k distinct vectors drawn uniformly
//! 2. Assign every vector to its nearest centroid (ties to lowest index)
//! 3. If any cluster received nothing, fail with `DegeneratePartition`
//! 4. Replace each cluster's members and record how far its centroid moved
//! 5. Stop when no centroid moved at all; otherwise go back to 2
//!
//! There is no iteration cap. Convergence means the assignment is stable,
//! i.e. the largest centroid shift is exactly zero.

use rand::Rng;
use tracing::{debug, trace};

use crate::algorithms::{assign, sample_seed_indices, validate_input};
use crate::cluster::Cluster;
use crate::error::{ClusterError, ClusterResult};
use crate::partition::{dissimilarity, Partition};
use crate::vector::FeatureVector;

/// Run k-means once from a random initialization.
///
/// `vectors` is only read; seeds are sampled by index.
///
/// # Errors
///
/// - `ClusterError::EmptyInput`, `InsufficientVectors`, `DimensionMismatch`,
///   `NonFiniteFeature` from input validation
/// - `ClusterError::DegeneratePartition` if an assignment step leaves a
///   cluster empty. Fatal for this run only; retrying is the caller's call.
pub fn kmeans<R: Rng + ?Sized>(
    vectors: &[FeatureVector],
    k: usize,
    rng: &mut R,
) -> ClusterResult<Partition> {
    validate_input(vectors, k)?;

    let mut clusters: Vec<Cluster> = sample_seed_indices(rng, vectors.len(), k)
        .into_iter()
        .map(|i| Cluster::singleton(vectors[i].clone()))
        .collect();

    debug!(k, n = vectors.len(), "Starting k-means run");

    let mut quality_history = Vec::new();
    let mut iteration = 0;
    loop {
        iteration += 1;

        let assignments = assign(vectors, &clusters)?;
        if let Some(cluster_index) = assignments.iter().position(Vec::is_empty) {
            debug!(cluster_index, iteration, "Degenerate partition");
            return Err(ClusterError::DegeneratePartition {
                cluster_index,
                iteration,
            });
        }

        let mut max_shift = 0.0f64;
        for (cluster, members) in clusters.iter_mut().zip(assignments) {
            let shift = cluster.update(members)?;
            max_shift = max_shift.max(shift);
        }

        let quality = dissimilarity(&clusters);
        quality_history.push(quality);

        trace!(iteration, max_shift, quality, "k-means iteration");
        for cluster in &clusters {
            trace!("{}", cluster);
        }

        if max_shift == 0.0 {
            break;
        }
    }

    debug!(
        iterations = iteration,
        dissimilarity = %format!("{:.4}", quality_history.last().copied().unwrap_or_default()),
        "k-means converged"
    );

    Ok(Partition::new(clusters, iteration, quality_history))
}
