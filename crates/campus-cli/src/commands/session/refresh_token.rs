//! Refresh token command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(ctx: &Context, _args: RefreshTokenArgs) -> Result<()> {
    ctx.require_session()?;

    ctx.client
        .auth()
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed");
    Ok(())
}
