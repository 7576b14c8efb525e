//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, ctx: &AppContext) -> Result<()> {
    let user = ctx
        .auth()
        .login(&args.email, &args.password)
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Name", &user.name);
    output::field("Email", &user.email);
    output::field("Admin", if user.is_admin { "yes" } else { "no" });

    Ok(())
}
