//! Building blocks shared by the single-run algorithm and the driver.
//!
//! Seed selection, nearest-centroid search and the assignment step.

use rand::Rng;

use crate::cluster::Cluster;
use crate::error::{ClusterError, ClusterResult};
use crate::vector::FeatureVector;

/// Fail fast on inputs no run could ever cluster.
///
/// # Errors
///
/// - `ClusterError::EmptyInput` if `vectors` is empty or `k == 0`
/// - `ClusterError::InsufficientVectors` if `k > vectors.len()`
/// - `ClusterError::DimensionMismatch` if any vector's length differs from
///   the first vector's
/// - `ClusterError::NonFiniteFeature` if any feature is NaN or infinite
pub fn validate_input(vectors: &[FeatureVector], k: usize) -> ClusterResult<()> {
    let first = vectors
        .first()
        .ok_or_else(|| ClusterError::empty_input("vectors must not be empty"))?;
    if k == 0 {
        return Err(ClusterError::empty_input("k must be > 0"));
    }
    if k > vectors.len() {
        return Err(ClusterError::InsufficientVectors {
            k,
            available: vectors.len(),
        });
    }

    let dim = first.dimensionality();
    for vector in vectors {
        if vector.dimensionality() != dim {
            return Err(ClusterError::DimensionMismatch {
                expected: dim,
                actual: vector.dimensionality(),
            });
        }
        if let Some(position) = vector.features().iter().position(|x| !x.is_finite()) {
            return Err(ClusterError::NonFiniteFeature {
                id: vector.id().to_string(),
                position,
            });
        }
    }
    Ok(())
}

/// Draw `k` distinct indices in `0..n`, uniformly without replacement.
///
/// The caller's collection is never reordered; only indices are sampled.
/// Requires `k <= n` (checked by [`validate_input`]).
pub fn sample_seed_indices<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k).into_vec()
}

/// Index of the cluster whose centroid is closest to `vector`.
///
/// Ties go to the lowest cluster index: a later cluster replaces the current
/// best only when strictly closer.
///
/// # Errors
///
/// - `ClusterError::EmptyInput` if `clusters` is empty
/// - `ClusterError::DimensionMismatch` from the distance metric
pub fn nearest_cluster(vector: &FeatureVector, clusters: &[Cluster]) -> ClusterResult<usize> {
    let (first, rest) = clusters
        .split_first()
        .ok_or_else(|| ClusterError::empty_input("no clusters to assign to"))?;

    let mut best_index = 0;
    let mut best_distance = vector.distance(first.centroid())?;
    for (offset, cluster) in rest.iter().enumerate() {
        let distance = vector.distance(cluster.centroid())?;
        if distance < best_distance {
            best_distance = distance;
            best_index = offset + 1;
        }
    }
    Ok(best_index)
}

/// Assign every vector to its nearest cluster.
///
/// Returns one member list per cluster, each in input order. Lists may be
/// empty; detecting that is the caller's job.
///
/// # Errors
///
/// Same as [`nearest_cluster`].
pub fn assign(
    vectors: &[FeatureVector],
    clusters: &[Cluster],
) -> ClusterResult<Vec<Vec<FeatureVector>>> {
    let mut buckets: Vec<Vec<FeatureVector>> = vec![Vec::new(); clusters.len()];
    for vector in vectors {
        let index = nearest_cluster(vector, clusters)?;
        buckets[index].push(vector.clone());
    }
    Ok(buckets)
}
