//! Labeled feature vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClusterResult;
use crate::metrics::euclidean_distance;

/// Labels strictly above this value count as the positive class.
pub const POSITIVE_LABEL_THRESHOLD: f64 = 0.5;

/// Id given to synthetic centroid vectors.
pub const CENTROID_ID: &str = "centroid";

/// A named, labeled point in feature space.
///
/// Immutable after construction. Clustering groups and compares vectors but
/// never edits them. The label is opaque to the algorithm; only reporting
/// interprets it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    id: String,
    features: Vec<f64>,
    label: f64,
}

impl FeatureVector {
    /// Create a vector from caller-supplied data.
    pub fn new(id: impl Into<String>, features: Vec<f64>, label: f64) -> Self {
        Self {
            id: id.into(),
            features,
            label,
        }
    }

    /// Create a synthetic centroid vector (id `"centroid"`, label `0.0`).
    pub fn centroid(features: Vec<f64>) -> Self {
        Self::new(CENTROID_ID, features, 0.0)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    #[inline]
    pub fn label(&self) -> f64 {
        self.label
    }

    /// Number of features.
    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.features.len()
    }

    /// True when the label exceeds [`POSITIVE_LABEL_THRESHOLD`].
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.label > POSITIVE_LABEL_THRESHOLD
    }

    /// Euclidean distance to another vector.
    ///
    /// # Errors
    ///
    /// `ClusterError::DimensionMismatch` if the feature lengths differ.
    #[inline]
    pub fn distance(&self, other: &FeatureVector) -> ClusterResult<f64> {
        euclidean_distance(&self.features, &other.features)
    }
}

impl fmt::Display for FeatureVector {
    /// Formats as `id:f1, f2, ...:label` with four decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.id)?;
        write_features(f, &self.features)?;
        write!(f, ":{:.4}", self.label)
    }
}

/// Write features as a comma-separated list with four decimals.
pub(crate) fn write_features(f: &mut fmt::Formatter<'_>, features: &[f64]) -> fmt::Result {
    for (i, value) in features.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:.4}", value)?;
    }
    Ok(())
}
