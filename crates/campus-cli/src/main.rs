//! campus - command line client for the campus admin API.
//!
//! A thin wrapper over `campus-http` for scripting and debugging against a
//! backend: sign in, inspect the stored session and call the CRUD
//! endpoints.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{prefs, request, resource};
use session::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let mut ctx = Context::open(&cli.api)?;

    let result = match cli.command {
        Commands::Session(cmd) => commands::session::handle(&ctx, cmd).await,
        Commands::Prefs(cmd) => prefs::handle(&ctx, cmd),
        Commands::Request(args) => request::run(&ctx, args).await,
        Commands::Resource(cmd) => resource::handle(&ctx, cmd).await,
    };

    ctx.report_session_events();
    result
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
