//! Error types for k-means clustering.
//!
//! Only [`ClusterError::DegeneratePartition`] is recoverable, and only by the
//! multi-trial driver, which discards the run and retries with a fresh random
//! initialization. Every other variant is fatal and propagates to the caller.

use thiserror::Error;

/// Errors raised by the clustering core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    /// Two feature sequences have different lengths.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length of the reference vector (first operand or first input vector).
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },

    /// A feature is NaN or infinite; no distance involving it is meaningful.
    #[error("Non-finite feature {position} in vector '{id}'")]
    NonFiniteFeature {
        /// Id of the offending vector.
        id: String,
        /// Index of the offending feature.
        position: usize,
    },

    /// Clustering was invoked with nothing to cluster or with k == 0.
    #[error("Empty input: {reason}")]
    EmptyInput {
        /// What was empty.
        reason: String,
    },

    /// More clusters requested than there are vectors to seed them with.
    #[error("k ({k}) must be <= number of vectors ({available})")]
    InsufficientVectors {
        /// Requested cluster count.
        k: usize,
        /// Number of input vectors.
        available: usize,
    },

    /// A centroid was requested for a cluster with no members.
    #[error("Cannot compute centroid of an empty cluster")]
    EmptyCluster,

    /// An assignment step left a cluster with no members.
    #[error("Degenerate partition: cluster {cluster_index} is empty after iteration {iteration}")]
    DegeneratePartition {
        /// Index of the first cluster found empty.
        cluster_index: usize,
        /// 1-based iteration in which it emptied.
        iteration: usize,
    },

    /// The driver hit its degenerate-run budget before finishing its trials.
    #[error(
        "Clustering exhausted: {degenerate_runs} degenerate runs with \
         {completed_trials}/{requested_trials} trials completed"
    )]
    ClusteringExhausted {
        /// Degenerate runs discarded during the call.
        degenerate_runs: usize,
        /// Successful trials completed before giving up.
        completed_trials: usize,
        /// Trials the caller asked for.
        requested_trials: usize,
    },

    /// Configuration failed validation or could not be loaded.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl ClusterError {
    /// Build an [`ClusterError::EmptyInput`] error.
    pub fn empty_input(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }

    /// Build an [`ClusterError::InvalidConfig`] error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for the one error the multi-trial driver recovers from.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegeneratePartition { .. })
    }
}

/// Result alias for clustering operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
