//! CLI errors and exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Runtime failure
//! - 2: Invalid input or configuration

use std::path::PathBuf;

use kmeans_trials_core::ClusterError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable rows in '{}'", path.display())]
    EmptyDataset { path: PathBuf },

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// I/O failures, exhausted retries.
    Failure = 1,
    /// Bad data or configuration; rerunning unchanged will fail again.
    InvalidInput = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&CliError> for CliExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::EmptyDataset { .. } => CliExitCode::InvalidInput,
            CliError::Cluster(e) => match e {
                ClusterError::EmptyInput { .. }
                | ClusterError::DimensionMismatch { .. }
                | ClusterError::NonFiniteFeature { .. }
                | ClusterError::InsufficientVectors { .. }
                | ClusterError::InvalidConfig { .. } => CliExitCode::InvalidInput,
                _ => CliExitCode::Failure,
            },
            CliError::Io { .. } | CliError::Json(_) => CliExitCode::Failure,
        }
    }
}

/// Map an error to the process exit code.
pub fn exit_code_for_error(err: &CliError) -> i32 {
    CliExitCode::from(err).into()
}
