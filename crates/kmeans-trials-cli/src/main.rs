//! k-means trials CLI
//!
//! Loads a delimited dataset of labeled feature rows, optionally z-score
//! scales each feature column, and reports best-of-N k-means partitions.
//!
//! # Commands
//!
//! - `cluster`: run best-of-N k-means for one or more k and print the
//!   label composition of each cluster
//! - `describe`: print the loaded (and scaled) vectors
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Runtime failure (I/O, clustering exhausted)
//! - 2: Invalid input or configuration

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod data;
mod error;

/// k-means trials - best-of-N clustering of labeled datasets
#[derive(Parser)]
#[command(name = "kmeans-trials")]
#[command(version)]
#[command(about = "Best-of-N k-means clustering with per-cluster label composition")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster a dataset and report each cluster's positive fraction
    Cluster(commands::cluster::ClusterArgs),
    /// Print the vectors as they enter the clustering core
    Describe(commands::describe::DescribeArgs),
}

fn main() {
    let cli = Cli::parse();

    // -vvv shows every k-means iteration.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Cluster(args) => commands::cluster::cluster_command(args),
        Commands::Describe(args) => commands::describe::describe_command(args),
    };

    std::process::exit(exit_code);
}
