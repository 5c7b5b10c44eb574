//! CLI subcommands.
//!
//! Each command returns the process exit code.

pub mod cluster;
pub mod describe;
