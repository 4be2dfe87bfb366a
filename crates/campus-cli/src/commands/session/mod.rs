//! Session subcommand implementations.

mod login;
mod logout;
mod module;
mod refresh_token;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionSubcommand {
    /// Sign in and store the session
    Login(login::LoginArgs),

    /// Sign out and clear the stored session
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Exchange the refresh token for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Show or change the selected module
    Module(module::ModuleArgs),
}

pub async fn handle(ctx: &Context, cmd: SessionCommand) -> Result<()> {
    match cmd.command {
        SessionSubcommand::Login(args) => login::run(ctx, args).await,
        SessionSubcommand::Logout(args) => logout::run(ctx, args).await,
        SessionSubcommand::Whoami(args) => whoami::run(ctx, args).await,
        SessionSubcommand::RefreshToken(args) => refresh_token::run(ctx, args).await,
        SessionSubcommand::Module(args) => module::run(ctx, args),
    }
}
