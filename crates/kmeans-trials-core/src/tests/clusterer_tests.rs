//! Tests for the multi-trial driver.

use crate::clusterer::{best_of, best_of_parallel, best_of_with_config, Clusterer, KMeansTrials};
use crate::config::KMeansConfig;
use crate::error::ClusterError;
use crate::partition::{summarize, Partition};

use super::helpers::{assert_proper_cover, fv, noisy_dataset, seeded_rng, two_pairs};

#[test]
fn test_best_of_two_pairs_single_trial() {
    let vectors = two_pairs();

    let partition = best_of(&vectors, 2, 1, &mut seeded_rng(42)).unwrap();

    assert_proper_cover(&vectors, &partition);
    let mut fractions = summarize(&partition);
    fractions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(fractions, vec![0.0, 1.0]);
}

#[test]
fn test_best_of_is_proper_cover() {
    let vectors = noisy_dataset();

    for k in 1..=6 {
        let partition = best_of(&vectors, k, 5, &mut seeded_rng(k as u64)).unwrap();
        assert_eq!(partition.len(), k);
        assert_proper_cover(&vectors, &partition);
    }

    println!("[VERIFIED] best_of returns a proper cover for k in 1..=6");
}

#[test]
fn test_more_trials_never_worse() {
    let vectors = noisy_dataset();

    for seed in 0..10 {
        let one = best_of(&vectors, 5, 1, &mut seeded_rng(seed)).unwrap();
        let twenty = best_of(&vectors, 5, 20, &mut seeded_rng(seed)).unwrap();

        println!(
            "seed {}: best-of-1 = {:.4}, best-of-20 = {:.4}",
            seed,
            one.dissimilarity(),
            twenty.dissimilarity()
        );
        assert!(twenty.dissimilarity() <= one.dissimilarity());
    }

    println!("[VERIFIED] best-of-20 <= best-of-1 for 10 seeds");
}

#[test]
fn test_best_is_minimum_of_trials() {
    let vectors = noisy_dataset();
    let config = KMeansConfig::new(4, 8).unwrap();

    let best = best_of_with_config(&vectors, &config, &mut seeded_rng(77)).unwrap();

    // Replay the same random stream one trial at a time.
    let mut rng = seeded_rng(77);
    let mut scores = Vec::new();
    while scores.len() < config.num_trials {
        match crate::kmeans::kmeans(&vectors, config.k, &mut rng) {
            Ok(p) => scores.push(p.dissimilarity()),
            Err(e) => assert!(e.is_degenerate()),
        }
    }
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);

    assert_eq!(best.dissimilarity(), min);
}

#[test]
fn test_degenerate_runs_are_retried() {
    // Seeding both clusters from the duplicated points always degenerates;
    // any other seeding succeeds.
    let vectors = vec![
        fv("a", &[0.0, 0.0], 0.0),
        fv("b", &[0.0, 0.0], 0.0),
        fv("c", &[5.0, 5.0], 1.0),
    ];

    for seed in 0..20 {
        let partition = best_of(&vectors, 2, 10, &mut seeded_rng(seed)).unwrap();
        assert_proper_cover(&vectors, &partition);
        assert_eq!(partition.dissimilarity(), 0.0);
    }

    println!("[VERIFIED] degenerate runs never reach the caller");
}

#[test]
fn test_unachievable_k_exhausts() {
    let vectors: Vec<_> = (0..4).map(|i| fv(&format!("dup{}", i), &[2.0, 2.0], 1.0)).collect();
    let config = KMeansConfig::new(2, 3)
        .unwrap()
        .with_max_degenerate_runs(5);

    let result = best_of_with_config(&vectors, &config, &mut seeded_rng(0));

    assert_eq!(
        result,
        Err(ClusterError::ClusteringExhausted {
            degenerate_runs: 6,
            completed_trials: 0,
            requested_trials: 3,
        })
    );
    println!("[VERIFIED] unachievable k stops after the retry budget: {:?}", result);
}

#[test]
fn test_zero_retry_budget_fails_on_first_degenerate_run() {
    let vectors: Vec<_> = (0..3).map(|i| fv(&format!("dup{}", i), &[0.0], 0.0)).collect();
    let config = KMeansConfig::new(2, 1).unwrap().with_max_degenerate_runs(0);

    let result = best_of_with_config(&vectors, &config, &mut seeded_rng(0));

    assert!(matches!(
        result,
        Err(ClusterError::ClusteringExhausted {
            degenerate_runs: 1,
            ..
        })
    ));
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let mut rng = seeded_rng(0);

    let empty = best_of(&[], 2, 1, &mut rng);
    assert!(matches!(empty, Err(ClusterError::EmptyInput { .. })));

    let zero_k = best_of(&two_pairs(), 0, 1, &mut rng);
    assert!(matches!(zero_k, Err(ClusterError::EmptyInput { .. })));

    let too_many = best_of(&two_pairs(), 5, 1, &mut rng);
    assert_eq!(
        too_many,
        Err(ClusterError::InsufficientVectors { k: 5, available: 4 })
    );

    let zero_trials = best_of(&two_pairs(), 2, 0, &mut rng);
    assert!(matches!(zero_trials, Err(ClusterError::InvalidConfig { .. })));

    let mut ragged = two_pairs();
    ragged.push(fv("ragged", &[1.0, 2.0, 3.0], 0.0));
    let mismatch = best_of(&ragged, 2, 1, &mut rng);
    assert_eq!(
        mismatch,
        Err(ClusterError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );

    println!("[VERIFIED] FAIL FAST: empty, k=0, k>n, trials=0, ragged input rejected");
}

#[test]
fn test_parallel_is_deterministic() {
    let vectors = noisy_dataset();
    let config = KMeansConfig::new(4, 12).unwrap();

    let first = best_of_parallel(&vectors, &config, 1234).unwrap();
    let second = best_of_parallel(&vectors, &config, 1234).unwrap();

    assert_eq!(first, second);
    assert_proper_cover(&vectors, &first);
}

#[test]
fn test_parallel_keeps_first_best_slot() {
    let vectors = noisy_dataset();
    let config = KMeansConfig::new(5, 10).unwrap();
    let base_seed = 500;

    let parallel = best_of_parallel(&vectors, &config, base_seed).unwrap();

    // Each slot is an independent single-trial best_of on its own stream.
    let mut expected = None;
    for trial in 0..config.num_trials as u64 {
        let candidate =
            best_of(&vectors, config.k, 1, &mut seeded_rng(base_seed + trial)).unwrap();
        let better = expected
            .as_ref()
            .map_or(true, |best: &Partition| candidate.dissimilarity() < best.dissimilarity());
        if better {
            expected = Some(candidate);
        }
    }

    assert_eq!(Some(parallel), expected);
    println!("[VERIFIED] parallel reduction matches sequential slot order");
}

#[test]
fn test_parallel_exhausts_on_unachievable_k() {
    let vectors: Vec<_> = (0..3).map(|i| fv(&format!("dup{}", i), &[0.0, 0.0], 0.0)).collect();
    let config = KMeansConfig::new(3, 4).unwrap().with_max_degenerate_runs(2);

    let result = best_of_parallel(&vectors, &config, 9);

    assert!(matches!(
        result,
        Err(ClusterError::ClusteringExhausted {
            degenerate_runs: 3,
            completed_trials: 0,
            requested_trials: 4,
        })
    ));
}

#[test]
fn test_seeded_clusterer_is_reproducible() {
    let vectors = noisy_dataset();
    let config = KMeansConfig::new(3, 5).unwrap().with_seed(2718);

    let mut a = KMeansTrials::new(config.clone()).unwrap();
    let mut b = KMeansTrials::new(config).unwrap();

    for _ in 0..3 {
        assert_eq!(a.cluster(&vectors).unwrap(), b.cluster(&vectors).unwrap());
    }
}

#[test]
fn test_clusterer_parallel_mode() {
    let vectors = noisy_dataset();
    let config = KMeansConfig::new(3, 6)
        .unwrap()
        .with_seed(31)
        .with_parallel(true);

    let mut a = KMeansTrials::new(config.clone()).unwrap();
    let mut b = KMeansTrials::new(config).unwrap();

    let pa = a.cluster(&vectors).unwrap();
    assert_eq!(pa, b.cluster(&vectors).unwrap());
    assert_proper_cover(&vectors, &pa);
}

#[test]
fn test_clusterer_rejects_invalid_config() {
    let config = KMeansConfig::default().with_num_trials(0);
    assert!(matches!(
        KMeansTrials::new(config),
        Err(ClusterError::InvalidConfig { .. })
    ));
}
