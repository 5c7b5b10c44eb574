//! Best-of-N k-means clustering over labeled feature vectors.
//!
//! Partitions a set of [`FeatureVector`]s into a fixed number of groups,
//! repeats the randomized clustering several times, keeps the partition with
//! the lowest total within-cluster variability, and reports the label
//! composition of each group.
//!
//! # What this crate does not do
//!
//! It does not choose k, scale features, load data, or render results.
//! Those belong to the caller.
//!
//! # Errors
//!
//! Callers only ever see input and configuration errors
//! ([`ClusterError::EmptyInput`], [`ClusterError::DimensionMismatch`], ...)
//! or [`ClusterError::ClusteringExhausted`] when k is not achievable from the
//! data. Degenerate runs are retried internally.
//!
//! # Example
//!
//! ```
//! use kmeans_trials_core::{best_of, summarize, FeatureVector};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let vectors = vec![
//!     FeatureVector::new("p0", vec![0.0, 0.0], 0.0),
//!     FeatureVector::new("p1", vec![0.0, 0.1], 0.0),
//!     FeatureVector::new("p2", vec![10.0, 10.0], 1.0),
//!     FeatureVector::new("p3", vec![10.0, 10.1], 1.0),
//! ];
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let partition = best_of(&vectors, 2, 1, &mut rng).unwrap();
//! let mut fractions = summarize(&partition);
//! fractions.sort_by(|a, b| a.partial_cmp(b).unwrap());
//! assert_eq!(fractions, vec![0.0, 1.0]);
//! ```

pub mod algorithms;
pub mod cluster;
pub mod clusterer;
pub mod config;
pub mod error;
pub mod kmeans;
pub mod metrics;
pub mod partition;
pub mod vector;

#[cfg(test)]
mod tests;

pub use cluster::{compute_centroid, Cluster};
pub use clusterer::{best_of, best_of_parallel, best_of_with_config, Clusterer, KMeansTrials};
pub use config::KMeansConfig;
pub use error::{ClusterError, ClusterResult};
pub use kmeans::kmeans;
pub use metrics::{euclidean_distance, minkowski_distance, squared_euclidean_distance};
pub use partition::{dissimilarity, summarize, ClusterSummary, Partition, PartitionReport};
pub use vector::{FeatureVector, POSITIVE_LABEL_THRESHOLD};
