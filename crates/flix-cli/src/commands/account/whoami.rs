//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, ctx: &AppContext) -> Result<()> {
    let user = ctx
        .auth()
        .current_user()
        .context("Not logged in. Run 'bahamaflix account login' first.")?;

    if args.json {
        return output::json_pretty(&user);
    }

    output::field("Name", &user.name);
    output::field("Email", &user.email);
    output::field("Admin", if user.is_admin { "yes" } else { "no" });
    output::field("Data", &ctx.data_dir.display().to_string());

    Ok(())
}
