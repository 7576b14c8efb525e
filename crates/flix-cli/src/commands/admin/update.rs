//! Update command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use flix_core::types::parse_cast;
use flix_core::{ContentId, ContentKind, ContentPatch};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the title to edit
    pub id: ContentId,

    #[arg(long = "type", short = 't')]
    pub kind: Option<ContentKind>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub watch_url: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    /// Rating from 0 to 5
    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long, conflicts_with = "clear_duration")]
    pub duration: Option<String>,

    /// Remove the running time (e.g., when turning a movie into a series)
    #[arg(long)]
    pub clear_duration: bool,

    #[arg(long, conflicts_with = "clear_seasons")]
    pub seasons: Option<u32>,

    /// Remove the season count
    #[arg(long)]
    pub clear_seasons: bool,

    #[arg(long, conflicts_with = "clear_director")]
    pub director: Option<String>,

    /// Remove the director
    #[arg(long)]
    pub clear_director: bool,

    /// Comma-separated cast list, replacing the current one
    #[arg(long)]
    pub cast: Option<String>,
}

impl UpdateArgs {
    fn to_patch(&self) -> ContentPatch {
        ContentPatch {
            kind: self.kind,
            title: self.title.clone(),
            slug: self.slug.clone(),
            genre: self.genre.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            watch_url: self.watch_url.clone(),
            year: self.year,
            rating: self.rating,
            duration: clearable(self.duration.clone(), self.clear_duration),
            seasons: clearable(self.seasons, self.clear_seasons),
            director: clearable(self.director.clone(), self.clear_director),
            cast: self.cast.as_deref().map(parse_cast),
        }
    }
}

/// `--field value` sets, `--clear-field` clears, neither leaves it alone.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}

pub async fn run(args: UpdateArgs, ctx: &AppContext) -> Result<()> {
    let patch = args.to_patch();
    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one field (see --help).");
    }

    let store = ctx.store();
    let known = store.get(args.id).is_some();

    store
        .update(args.id, &patch)
        .context("Failed to update title")?;

    if known {
        output::success(&format!("Updated {}", args.id));
    } else {
        output::success(&format!(
            "Stored patch for {} (no such title in the catalog)",
            args.id
        ));
    }
    Ok(())
}
