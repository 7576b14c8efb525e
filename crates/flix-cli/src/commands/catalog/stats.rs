//! Stats command implementation.

use anyhow::Result;
use clap::Args;

use flix_core::CatalogStats;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatsArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let stats = CatalogStats::of(&store.catalog());

    if args.json {
        return output::json(&stats);
    }

    output::field("Movies", &stats.movies.to_string());
    output::field("Series", &stats.series.to_string());
    output::field("Total", &stats.total.to_string());
    Ok(())
}
