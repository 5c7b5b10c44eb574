//! A cluster slot: an owned member list plus its derived centroid.

use std::fmt;

use crate::error::{ClusterError, ClusterResult};
use crate::metrics::squared_euclidean_unchecked;
use crate::vector::{write_features, FeatureVector};

/// Compute the component-wise mean of `members`.
///
/// The result is a synthetic vector (id `"centroid"`, label `0.0`) used only
/// for distance comparisons.
///
/// # Errors
///
/// - `ClusterError::EmptyCluster` if `members` is empty
/// - `ClusterError::DimensionMismatch` if members disagree on length
pub fn compute_centroid(members: &[FeatureVector]) -> ClusterResult<FeatureVector> {
    let first = members.first().ok_or(ClusterError::EmptyCluster)?;
    let dim = first.dimensionality();

    let mut sums = vec![0.0f64; dim];
    for member in members {
        if member.dimensionality() != dim {
            return Err(ClusterError::DimensionMismatch {
                expected: dim,
                actual: member.dimensionality(),
            });
        }
        for (sum, value) in sums.iter_mut().zip(member.features()) {
            *sum += value;
        }
    }

    let count = members.len() as f64;
    for sum in sums.iter_mut() {
        *sum /= count;
    }

    Ok(FeatureVector::centroid(sums))
}

/// A group of feature vectors and the mean of those vectors.
///
/// The centroid is always the exact mean of the current members and is
/// never mutated on its own. Membership is replaced wholesale by
/// [`Cluster::update`], never patched.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    members: Vec<FeatureVector>,
    centroid: FeatureVector,
}

impl Cluster {
    /// Create a cluster from a non-empty member list.
    ///
    /// # Errors
    ///
    /// Same as [`compute_centroid`].
    pub fn new(members: Vec<FeatureVector>) -> ClusterResult<Self> {
        let centroid = compute_centroid(&members)?;
        Ok(Self { members, centroid })
    }

    /// Create a cluster whose only member is `seed`.
    ///
    /// The centroid equals the seed's features.
    pub fn singleton(seed: FeatureVector) -> Self {
        let centroid = FeatureVector::centroid(seed.features().to_vec());
        Self {
            members: vec![seed],
            centroid,
        }
    }

    /// Replace the members and recompute the centroid.
    ///
    /// Returns how far the centroid moved. On error the cluster is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`compute_centroid`], plus `DimensionMismatch` if the new
    /// centroid's length differs from the old one.
    pub fn update(&mut self, members: Vec<FeatureVector>) -> ClusterResult<f64> {
        let centroid = compute_centroid(&members)?;
        let shift = self.centroid.distance(&centroid)?;
        self.members = members;
        self.centroid = centroid;
        Ok(shift)
    }

    /// Sum of squared distances from each member to the centroid.
    pub fn variability(&self) -> f64 {
        self.members
            .iter()
            .map(|m| squared_euclidean_unchecked(m.features(), self.centroid.features()))
            .sum()
    }

    #[inline]
    pub fn centroid(&self) -> &FeatureVector {
        &self.centroid
    }

    #[inline]
    pub fn members(&self) -> &[FeatureVector] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fraction of members whose label counts as positive.
    pub fn positive_fraction(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let positives = self.members.iter().filter(|m| m.is_positive()).count();
        positives as f64 / self.members.len() as f64
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.members.iter().map(FeatureVector::id).collect();
        ids.sort_unstable();

        f.write_str("Cluster with centroid ")?;
        write_features(f, self.centroid.features())?;
        write!(f, " contains:\n{}", ids.join(", "))
    }
}
