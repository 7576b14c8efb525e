//! Account subcommands.

mod login;
mod logout;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Forget the logged-in user
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: AccountCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        AccountSubcommand::Login(args) => login::run(args, ctx).await,
        AccountSubcommand::Logout(args) => logout::run(args, ctx).await,
        AccountSubcommand::Whoami(args) => whoami::run(args, ctx).await,
    }
}
