//! Whoami command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: WhoamiArgs) -> Result<()> {
    ctx.require_session()?;

    let user = ctx
        .client
        .auth()
        .me()
        .await
        .context("Failed to fetch profile")?;

    if args.json {
        return output::json(&user, true);
    }

    output::field("Name", &user.name);
    output::field("Email", &user.email);
    if let Some(ref role) = user.role {
        output::field("Role", role);
    }
    if let Some(module) = ctx.session().selected_module() {
        output::field("Module", module.as_str());
    }
    output::field("API", ctx.client.config().base_url.as_str());

    Ok(())
}
