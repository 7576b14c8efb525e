//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, ctx: &AppContext) -> Result<()> {
    ctx.auth().logout().context("Failed to logout")?;
    output::success("Logged out");
    Ok(())
}
