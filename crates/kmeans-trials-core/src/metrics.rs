//! Distance metrics over feature sequences.
//!
//! The clustering core always uses order 2 (Euclidean); the general
//! Minkowski form is exposed for callers that want other orders.

use crate::error::{ClusterError, ClusterResult};

#[inline]
fn check_dimensions(a: &[f64], b: &[f64]) -> ClusterResult<()> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Order-`p` Minkowski distance: `(sum |a_i - b_i|^p)^(1/p)`.
///
/// # Errors
///
/// - `ClusterError::DimensionMismatch` if the slices differ in length
/// - `ClusterError::InvalidConfig` if `p` is not a finite value >= 1
pub fn minkowski_distance(a: &[f64], b: &[f64], p: f64) -> ClusterResult<f64> {
    check_dimensions(a, b)?;
    if !p.is_finite() || p < 1.0 {
        return Err(ClusterError::invalid_config(format!(
            "Minkowski order must be a finite value >= 1, got {}",
            p
        )));
    }

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum();
    Ok(sum.powf(1.0 / p))
}

/// Internal squared distance without validation.
/// Caller must ensure slices have equal length.
#[inline]
pub(crate) fn squared_euclidean_unchecked(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Squared Euclidean distance. Avoids the square root for comparisons.
///
/// # Errors
///
/// `ClusterError::DimensionMismatch` if the slices differ in length.
#[inline]
pub fn squared_euclidean_distance(a: &[f64], b: &[f64]) -> ClusterResult<f64> {
    check_dimensions(a, b)?;
    Ok(squared_euclidean_unchecked(a, b))
}

/// Euclidean distance (Minkowski order 2).
///
/// # Errors
///
/// `ClusterError::DimensionMismatch` if the slices differ in length.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> ClusterResult<f64> {
    squared_euclidean_distance(a, b).map(f64::sqrt)
}
