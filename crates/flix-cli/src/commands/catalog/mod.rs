//! Catalog browsing subcommands.

mod genres;
mod list;
mod search;
mod show;
mod stats;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct CatalogCommand {
    #[command(subcommand)]
    pub command: CatalogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// List titles, optionally filtered by type or genre
    List(list::ListArgs),

    /// Search titles by text
    Search(search::SearchArgs),

    /// Show one title and related titles
    Show(show::ShowArgs),

    /// List the genres present in the catalog
    Genres(genres::GenresArgs),

    /// Count movies and series
    Stats(stats::StatsArgs),
}

pub async fn handle(cmd: CatalogCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        CatalogSubcommand::List(args) => list::run(args, ctx).await,
        CatalogSubcommand::Search(args) => search::run(args, ctx).await,
        CatalogSubcommand::Show(args) => show::run(args, ctx).await,
        CatalogSubcommand::Genres(args) => genres::run(args, ctx).await,
        CatalogSubcommand::Stats(args) => stats::run(args, ctx).await,
    }
}
