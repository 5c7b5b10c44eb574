//! `cluster`: best-of-N k-means over a dataset for one or more k.
//!
//! # Output
//!
//! Text (default), per k:
//!
//! ```text
//! Test k-means (k = 2)
//! Cluster of size 118 with fraction of positives = 0.3305
//! Cluster of size 132 with fraction of positives = 0.0985
//! Dissimilarity = 612.4471 over 2 trials
//! ```
//!
//! With `--json`, a JSON array with one report per k.
//!
//! # Configuration precedence
//!
//! flags > `KMEANS_*` environment > `--config` TOML > defaults.
//! Without `-k`, the k from a config file or a parsable `KMEANS_K` is used;
//! if neither is present the sweep 2, 4, 6 runs.

use std::path::PathBuf;

use clap::Args;
use kmeans_trials_core::{Clusterer, FeatureVector, KMeansConfig, KMeansTrials, PartitionReport};
use tracing::{error, info};

use crate::data::{load_vectors, DataOptions};
use crate::error::{exit_code_for_error, CliResult};

/// k values tried when none are configured.
pub const DEFAULT_K_SWEEP: [usize; 3] = [2, 4, 6];

/// Trials per k when none are configured.
pub const DEFAULT_TRIALS: usize = 2;

#[derive(Args, Debug)]
pub struct ClusterArgs {
    #[command(flatten)]
    pub input: DataOptions,

    /// Number of clusters; repeat to sweep several values
    #[arg(short = 'k', long = "clusters", value_name = "K")]
    pub k: Vec<usize>,

    /// Successful trials per k
    #[arg(short = 't', long)]
    pub trials: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Degenerate runs tolerated before giving up
    #[arg(long)]
    pub max_degenerate_runs: Option<usize>,

    /// Run trials in parallel
    #[arg(long)]
    pub parallel: bool,

    /// TOML configuration file
    #[arg(long, env = "KMEANS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Execute the cluster command.
pub fn cluster_command(args: ClusterArgs) -> i32 {
    match run(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("cluster failed: {}", e);
            exit_code_for_error(&e)
        }
    }
}

fn run(args: ClusterArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;
    let ks = resolve_ks(&args, &config);
    let vectors = load_vectors(&args.input)?;

    info!(
        vectors = vectors.len(),
        ks = ?ks,
        trials = config.num_trials,
        seed = ?config.seed,
        "Clustering dataset"
    );

    let mut reports = Vec::with_capacity(ks.len());
    for k in ks {
        let report = cluster_once(&vectors, config.clone().with_k(k))?;
        if !args.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn resolve_config(args: &ClusterArgs) -> CliResult<KMeansConfig> {
    let base = match &args.config {
        Some(path) => KMeansConfig::from_file(path)?,
        None => KMeansConfig::default().with_num_trials(DEFAULT_TRIALS),
    };
    let mut config = base.with_env_overrides();

    if let Some(trials) = args.trials {
        config.num_trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max) = args.max_degenerate_runs {
        config.max_degenerate_runs = max;
    }
    if args.parallel {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn resolve_ks(args: &ClusterArgs, config: &KMeansConfig) -> Vec<usize> {
    if !args.k.is_empty() {
        args.k.clone()
    } else if args.config.is_some() || KMeansConfig::env_k().is_some() {
        vec![config.k]
    } else {
        DEFAULT_K_SWEEP.to_vec()
    }
}

fn cluster_once(vectors: &[FeatureVector], config: KMeansConfig) -> CliResult<PartitionReport> {
    let trials = config.num_trials;
    let mut clusterer = KMeansTrials::new(config)?;
    let partition = clusterer.cluster(vectors)?;
    Ok(PartitionReport::new(&partition, trials))
}

fn print_report(report: &PartitionReport) {
    println!("\nTest k-means (k = {})", report.k);
    for cluster in &report.clusters {
        println!(
            "Cluster of size {} with fraction of positives = {:.4}",
            cluster.size, cluster.positive_fraction
        );
    }
    println!(
        "Dissimilarity = {:.4} over {} trials",
        report.dissimilarity, report.trials
    );
}
