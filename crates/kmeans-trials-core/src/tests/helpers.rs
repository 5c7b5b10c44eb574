//! Helper functions for creating test data.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::partition::Partition;
use crate::vector::FeatureVector;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn fv(id: &str, features: &[f64], label: f64) -> FeatureVector {
    FeatureVector::new(id, features.to_vec(), label)
}

/// Two tight, far-apart pairs: negatives near the origin, positives near (10, 10).
pub fn two_pairs() -> Vec<FeatureVector> {
    vec![
        fv("n0", &[0.0, 0.0], 0.0),
        fv("n1", &[0.0, 0.1], 0.0),
        fv("p0", &[10.0, 10.0], 1.0),
        fv("p1", &[10.0, 10.1], 1.0),
    ]
}

/// Noisy points scattered around `centers`, `per_center` each.
///
/// Points around even-indexed centers are labeled 1.0, odd ones 0.0.
pub fn blobs(
    seed: u64,
    centers: &[[f64; 2]],
    per_center: usize,
    spread: f64,
) -> Vec<FeatureVector> {
    let mut rng = seeded_rng(seed);
    let mut vectors = Vec::with_capacity(centers.len() * per_center);
    for (c, center) in centers.iter().enumerate() {
        let label = if c % 2 == 0 { 1.0 } else { 0.0 };
        for i in 0..per_center {
            let x = center[0] + rng.gen_range(-spread..spread);
            let y = center[1] + rng.gen_range(-spread..spread);
            vectors.push(fv(&format!("B{}_{:03}", c, i), &[x, y], label));
        }
    }
    vectors
}

/// Overlapping blobs where restarts genuinely land in different optima.
pub fn noisy_dataset() -> Vec<FeatureVector> {
    blobs(
        2024,
        &[[0.0, 0.0], [3.0, 0.5], [1.5, 3.0], [6.0, 6.0], [7.0, 2.0]],
        12,
        2.0,
    )
}

/// How many times each vector id appears across the partition.
pub fn membership_counts(partition: &Partition) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for cluster in partition.clusters() {
        for member in cluster.members() {
            *counts.entry(member.id().to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Assert every input vector appears in exactly one cluster.
pub fn assert_proper_cover(vectors: &[FeatureVector], partition: &Partition) {
    let counts = membership_counts(partition);
    assert_eq!(partition.total_points(), vectors.len());
    for v in vectors {
        assert_eq!(
            counts.get(v.id()).copied(),
            Some(1),
            "vector {} should appear exactly once",
            v.id()
        );
    }
}
