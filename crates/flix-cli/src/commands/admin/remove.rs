//! Remove command implementation.

use anyhow::{Context, Result};
use clap::Args;

use flix_core::ContentId;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Id of the title to delete
    pub id: ContentId,
}

pub async fn run(args: RemoveArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let title = store.get(args.id).map(|record| record.title);

    store.remove(args.id).context("Failed to remove title")?;

    match title {
        Some(title) => output::success(&format!("Removed '{}'", title)),
        None => output::success(&format!("Removed {}", args.id)),
    }
    Ok(())
}
