//! Partitions, partition quality, and caller-facing summaries.

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;

/// Total variability across `clusters`.
///
/// This is the objective k-means minimizes and the score the multi-trial
/// driver compares. Lower is better.
pub fn dissimilarity(clusters: &[Cluster]) -> f64 {
    clusters.iter().map(Cluster::variability).sum()
}

/// The k clusters produced by one converged run.
///
/// Every input vector belongs to exactly one cluster. Read-only outside
/// the crate.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Clusters in slot order. Length equals k.
    clusters: Vec<Cluster>,

    iterations: usize,

    quality_history: Vec<f64>,
}

impl Partition {
    pub(crate) fn new(clusters: Vec<Cluster>, iterations: usize, quality_history: Vec<f64>) -> Self {
        Self {
            clusters,
            iterations,
            quality_history,
        }
    }

    /// Aggregate quality score of this partition.
    pub fn dissimilarity(&self) -> f64 {
        dissimilarity(&self.clusters)
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of assign/update iterations the run took to converge.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Aggregate dissimilarity after each update step, in order.
    ///
    /// The last entry equals [`Partition::dissimilarity`].
    #[inline]
    pub fn quality_history(&self) -> &[f64] {
        &self.quality_history
    }

    #[inline]
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    /// Number of clusters (k).
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of vectors across all clusters.
    pub fn total_points(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Per-cluster size, positive fraction and centroid.
    pub fn summaries(&self) -> Vec<ClusterSummary> {
        self.clusters.iter().map(ClusterSummary::from).collect()
    }
}

/// Fraction of positively labeled members, one entry per cluster.
pub fn summarize(partition: &Partition) -> Vec<f64> {
    partition
        .clusters
        .iter()
        .map(Cluster::positive_fraction)
        .collect()
}

/// Label composition of one cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub size: usize,
    pub positive_fraction: f64,
    pub centroid: Vec<f64>,
}

impl From<&Cluster> for ClusterSummary {
    fn from(cluster: &Cluster) -> Self {
        Self {
            size: cluster.len(),
            positive_fraction: cluster.positive_fraction(),
            centroid: cluster.centroid().features().to_vec(),
        }
    }
}

/// Serializable report of a best-of-N clustering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionReport {
    /// Requested cluster count.
    pub k: usize,
    /// Successful trials the partition was selected from.
    pub trials: usize,
    /// Aggregate quality score of the selected partition.
    pub dissimilarity: f64,
    /// Iterations the selected run took to converge.
    pub iterations: usize,
    pub clusters: Vec<ClusterSummary>,
}

impl PartitionReport {
    pub fn new(partition: &Partition, trials: usize) -> Self {
        Self {
            k: partition.len(),
            trials,
            dissimilarity: partition.dissimilarity(),
            iterations: partition.iterations,
            clusters: partition.summaries(),
        }
    }
}
