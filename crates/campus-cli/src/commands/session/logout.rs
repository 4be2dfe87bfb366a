//! Logout command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(ctx: &Context, _args: LogoutArgs) -> Result<()> {
    if !ctx.session().has_session() {
        output::note("No active session.");
        return Ok(());
    }

    ctx.client
        .auth()
        .logout()
        .await
        .context("Failed to logout")?;

    output::success("Logged out");
    Ok(())
}
