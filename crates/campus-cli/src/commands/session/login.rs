//! Login command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use campus_core::{Credentials, Module};

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Module to open (hostel, education, accounts, library, boarding)
    #[arg(long, default_value = "hostel")]
    pub module: Module,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = ctx
        .client
        .auth()
        .login(&credentials, args.module)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    if let Some(user) = user {
        output::field("Name", &user.name);
        output::field("Email", &user.email);
    }
    output::field("Module", args.module.as_str());
    output::field("API", ctx.client.config().base_url.as_str());

    Ok(())
}
