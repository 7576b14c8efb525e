//! Log command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

pub async fn run(args: LogArgs, ctx: &AppContext) -> Result<()> {
    let log = ctx
        .store()
        .modifications()
        .context("Failed to read modification log")?;

    if args.compact {
        output::json(&log)
    } else {
        output::json_pretty(&log)
    }
}
