//! Administrative subcommands.
//!
//! Every subcommand requires an administrator to be logged in
//! (`bahamaflix account login`). The content store itself performs no
//! authorization.

mod add;
mod log;
mod remove;
mod update;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use flix_core::User;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// Add a new movie or series
    Add(add::AddArgs),

    /// Edit fields of an existing title
    Update(update::UpdateArgs),

    /// Delete a title
    Remove(remove::RemoveArgs),

    /// Print the stored modification log
    Log(log::LogArgs),
}

pub async fn handle(cmd: AdminCommand, ctx: &AppContext) -> Result<()> {
    require_admin(ctx)?;

    match cmd.command {
        AdminSubcommand::Add(args) => add::run(args, ctx).await,
        AdminSubcommand::Update(args) => update::run(args, ctx).await,
        AdminSubcommand::Remove(args) => remove::run(args, ctx).await,
        AdminSubcommand::Log(args) => log::run(args, ctx).await,
    }
}

fn require_admin(ctx: &AppContext) -> Result<User> {
    ctx.auth()
        .require_admin()
        .context("Administrator login required. Run 'bahamaflix account login' first.")
}
