//! List command implementation.

use anyhow::Result;
use clap::Args;

use flix_core::{CatalogQuery, ContentKind};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only this type (movie or series)
    #[arg(long = "type", short = 't')]
    pub kind: Option<ContentKind>,

    /// Only this genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Maximum number of titles to print
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let catalog = store.catalog();

    let mut query = CatalogQuery::default();
    if let Some(kind) = args.kind {
        query = query.kind(kind);
    }
    if let Some(genre) = args.genre {
        query = query.genre(genre);
    }

    let matches = query.filter(&catalog);
    let limit = args.limit.unwrap_or(matches.len());

    output::records(matches.into_iter().take(limit), args.json)
}
