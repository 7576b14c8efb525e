//! Search command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use flix_core::{CatalogQuery, ContentKind};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in titles, genres and descriptions
    pub text: String,

    /// Only this type (movie or series)
    #[arg(long = "type", short = 't')]
    pub kind: Option<ContentKind>,

    /// Only this genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let catalog = store.catalog();

    let mut query = CatalogQuery::default().text(&args.text);
    if let Some(kind) = args.kind {
        query = query.kind(kind);
    }
    if let Some(genre) = args.genre {
        query = query.genre(genre);
    }

    let matches = query.filter(&catalog);
    if matches.is_empty() && !args.json {
        eprintln!("{}", format!("No titles match '{}'", args.text).dimmed());
        return Ok(());
    }

    output::records(matches, args.json)
}
