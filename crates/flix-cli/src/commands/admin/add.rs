//! Add command implementation.

use anyhow::{Context, Result};
use clap::Args;

use flix_core::types::parse_cast;
use flix_core::{ContentDraft, ContentKind};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title of the movie or series
    pub title: String,

    /// Type of the title (movie or series)
    #[arg(long = "type", short = 't', default_value = "movie")]
    pub kind: ContentKind,

    /// Genre (e.g., Ação, Comédia)
    #[arg(long)]
    pub genre: String,

    /// Release year
    #[arg(long)]
    pub year: i32,

    /// Rating from 0 to 5
    #[arg(long, default_value_t = 0.0)]
    pub rating: f64,

    /// URL slug (derived from the title when omitted)
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Poster image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Where to watch it
    #[arg(long)]
    pub watch_url: Option<String>,

    /// Running time for movies (e.g., 2h 22min)
    #[arg(long)]
    pub duration: Option<String>,

    /// Number of seasons for series
    #[arg(long)]
    pub seasons: Option<u32>,

    #[arg(long)]
    pub director: Option<String>,

    /// Comma-separated cast list
    #[arg(long)]
    pub cast: Option<String>,

    /// Output the created record as JSON
    #[arg(long)]
    pub json: bool,
}

impl AddArgs {
    fn into_draft(self) -> ContentDraft {
        let mut draft = ContentDraft::new(self.kind, self.title, self.genre);
        draft.year = self.year;
        draft.rating = self.rating;
        draft.slug = self.slug.unwrap_or_default();
        draft.description = self.description.unwrap_or_default();
        draft.image = self.image.unwrap_or_default();
        draft.watch_url = self.watch_url.unwrap_or_default();
        draft.duration = self.duration;
        if self.seasons.is_some() {
            draft.seasons = self.seasons;
        }
        draft.director = self.director;
        draft.cast = self.cast.as_deref().map(parse_cast).unwrap_or_default();
        draft
    }
}

pub async fn run(args: AddArgs, ctx: &AppContext) -> Result<()> {
    let as_json = args.json;
    let store = ctx.store();

    let record = store
        .add(args.into_draft())
        .context("Failed to add title")?;

    if as_json {
        return output::json(&record);
    }

    output::field("ID", &record.id.to_string());
    output::field("Slug", &record.slug);
    output::success(&format!("Added {} '{}'", record.kind, record.title));
    Ok(())
}
