//! `describe`: print vectors as they enter the clustering core.

use clap::Args;
use tracing::error;

use crate::data::{load_vectors, DataOptions};
use crate::error::exit_code_for_error;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub input: DataOptions,
}

/// Execute the describe command.
pub fn describe_command(args: DescribeArgs) -> i32 {
    match load_vectors(&args.input) {
        Ok(vectors) => {
            for vector in &vectors {
                println!("{}", vector);
            }
            0
        }
        Err(e) => {
            error!("describe failed: {}", e);
            exit_code_for_error(&e)
        }
    }
}
