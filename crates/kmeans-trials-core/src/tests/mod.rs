//! Tests for the clustering core.
//!
//! # Test Organization
//!
//! - `helpers` - Deterministic data generators and seeded RNGs
//! - `vector_tests` - FeatureVector and distance behavior
//! - `cluster_tests` - Centroid, update and variability
//! - `kmeans_tests` - Single-run algorithm and assignment contract
//! - `clusterer_tests` - Multi-trial driver, retries and parallel reduction
//! - `config_tests` - KMeansConfig validation and loading
//! - `edge_cases` - Boundary conditions

mod helpers;

mod clusterer_tests;
mod vector_tests;
