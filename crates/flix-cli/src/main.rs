//! bahamaflix - Browse and administer the Bahama Flix catalog.
//!
//! A thin consumer of `flix-core`: every command opens the content store
//! over the file-backed storage in the data directory, so several running
//! instances share one modification log.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{account, admin, catalog, watch};
use context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let ctx = AppContext::from_cli(&cli)?;

    match cli.command {
        Commands::Catalog(cmd) => catalog::handle(cmd, &ctx).await,
        Commands::Admin(cmd) => admin::handle(cmd, &ctx).await,
        Commands::Account(cmd) => account::handle(cmd, &ctx).await,
        Commands::Watch(args) => watch::run(args, &ctx).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
