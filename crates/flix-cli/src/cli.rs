//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::account::AccountCommand;
use crate::commands::admin::AdminCommand;
use crate::commands::catalog::CatalogCommand;
use crate::commands::watch::WatchArgs;

/// Browse and administer the Bahama Flix catalog.
#[derive(Parser, Debug)]
#[command(name = "bahamaflix")]
#[command(author, version = env!("BAHAMAFLIX_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding the shared storage (defaults to the user data dir)
    #[arg(long, global = true, env = "BAHAMAFLIX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base catalog JSON file (defaults to the bundled catalog)
    #[arg(long, global = true, env = "BAHAMAFLIX_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the effective catalog
    Catalog(CatalogCommand),

    /// Add, edit and delete titles (administrators only)
    Admin(AdminCommand),

    /// Log in and out
    Account(AccountCommand),

    /// Follow catalog changes made by other instances
    Watch(WatchArgs),
}
