//! Tests for FeatureVector.

use crate::error::ClusterError;
use crate::vector::{FeatureVector, CENTROID_ID};

use super::helpers::{blobs, fv};

#[test]
fn test_distance_is_symmetric() {
    let vectors = blobs(7, &[[0.0, 0.0], [4.0, 4.0]], 6, 1.5);

    for a in &vectors {
        for b in &vectors {
            let ab = a.distance(b).unwrap();
            let ba = b.distance(a).unwrap();
            assert_eq!(ab, ba, "distance({}, {}) not symmetric", a.id(), b.id());
        }
    }

    println!("[VERIFIED] distance symmetric over {} pairs", vectors.len() * vectors.len());
}

#[test]
fn test_distance_to_self_is_zero() {
    let v = fv("self", &[1.25, -3.5, 8.0], 1.0);
    assert_eq!(v.distance(&v).unwrap(), 0.0);
}

#[test]
fn test_distance_dimension_mismatch() {
    let a = fv("a", &[1.0, 2.0], 0.0);
    let b = fv("b", &[1.0, 2.0, 3.0], 0.0);

    let err = a.distance(&b).unwrap_err();

    assert_eq!(
        err,
        ClusterError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
    println!("[VERIFIED] FAIL FAST: {}", err);
}

#[test]
fn test_positive_threshold_is_strict() {
    assert!(!fv("a", &[0.0], 0.0).is_positive());
    assert!(!fv("b", &[0.0], 0.5).is_positive());
    assert!(fv("c", &[0.0], 0.51).is_positive());
    assert!(fv("d", &[0.0], 1.0).is_positive());
}

#[test]
fn test_centroid_sentinel() {
    let c = FeatureVector::centroid(vec![1.0, 2.0]);
    assert_eq!(c.id(), CENTROID_ID);
    assert_eq!(c.label(), 0.0);
    assert_eq!(c.dimensionality(), 2);
}

#[test]
fn test_display_format() {
    let v = fv("P007", &[1.0, -2.5], 1.0);
    assert_eq!(v.to_string(), "P007:1.0000, -2.5000:1.0000");
}
