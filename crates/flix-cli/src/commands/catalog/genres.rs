//! Genres command implementation.

use anyhow::Result;
use clap::Args;

use flix_core::ContentKind;
use flix_core::query::{genres, of_kind};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct GenresArgs {
    /// Only genres of this type (movie or series)
    #[arg(long = "type", short = 't')]
    pub kind: Option<ContentKind>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: GenresArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let catalog = store.catalog();

    let records: Vec<_> = match args.kind {
        Some(kind) => of_kind(&catalog, kind).into_iter().cloned().collect(),
        None => catalog.to_vec(),
    };
    let genres = genres(&records);

    if args.json {
        return output::json(&genres);
    }
    for genre in genres {
        println!("{}", genre);
    }
    Ok(())
}
