//! Show command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use flix_core::query::{RELATED_LIMIT, find_by_slug, related};
use flix_core::{ContentKind, ContentRecord};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// URL slug of the title (e.g., jogos-vorazes)
    pub slug: String,

    /// Type of the title (movie or series)
    #[arg(long = "type", short = 't', default_value = "movie")]
    pub kind: ContentKind,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Detail<'a> {
    #[serde(flatten)]
    record: &'a ContentRecord,
    related: Vec<&'a ContentRecord>,
}

pub async fn run(args: ShowArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let catalog = store.catalog();

    let record = find_by_slug(&catalog, args.kind, &args.slug)
        .with_context(|| format!("No {} with slug '{}'", args.kind, args.slug))?;
    let related = related(&catalog, record, RELATED_LIMIT);

    if args.json {
        return output::json_pretty(&Detail { record, related });
    }

    println!("{}", record.title.bold());
    output::field("ID", &record.id.to_string());
    output::field("Type", record.kind.as_str());
    output::field("Genre", &record.genre);
    output::field("Year", &record.year.to_string());
    output::field("Rating", &format!("{:.1}", record.rating));
    if let Some(duration) = &record.duration {
        output::field("Duration", duration);
    }
    if let Some(seasons) = record.seasons {
        output::field("Seasons", &seasons.to_string());
    }
    if let Some(director) = &record.director {
        output::field("Director", director);
    }
    if !record.cast.is_empty() {
        output::field("Cast", &record.cast.join(", "));
    }
    if !record.watch_url.is_empty() {
        output::field("Watch", &record.watch_url);
    }
    if !record.description.is_empty() {
        println!();
        println!("{}", record.description);
    }

    if !related.is_empty() {
        println!();
        println!("{}", "Related".dimmed());
        for other in related {
            output::record_line(other);
        }
    }

    Ok(())
}
