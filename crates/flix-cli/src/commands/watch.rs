//! Watch command implementation.
//!
//! Keeps a content store open and prints the effective catalog whenever
//! another instance changes the shared modification log.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use flix_core::{CatalogStats, CatalogSync, CatalogView};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Print each catalog revision as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WatchArgs, ctx: &AppContext) -> Result<()> {
    let store = Arc::new(ctx.store());
    let mut view = store.subscribe();
    let sync = CatalogSync::spawn(Arc::clone(&store)).context("Failed to start watching")?;

    eprintln!("{}", "Watching for catalog changes...".dimmed());
    eprintln!("{}", "Press Ctrl+C to stop.".dimmed());
    eprintln!();

    print_view(&view.borrow_and_update(), args.json)?;

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    output::error("Catalog store closed");
                    break;
                }
                let current = view.borrow_and_update().clone();
                print_view(&current, args.json)?;
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
        }
    }

    sync.stop();
    Ok(())
}

fn print_view(view: &CatalogView, json: bool) -> Result<()> {
    if json {
        return output::json(&*view.records);
    }

    let stats = CatalogStats::of(&view.records);
    println!(
        "{} {} titles ({} movies, {} series)",
        "CATALOG".green(),
        stats.total,
        stats.movies,
        stats.series
    );
    Ok(())
}
