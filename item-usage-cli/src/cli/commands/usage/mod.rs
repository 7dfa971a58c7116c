//! Usage query commands (unused, used, elements, summary)

pub mod handler;

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct UsageArgs {
    /// Also write the result as CSV to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
