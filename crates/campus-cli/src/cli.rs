//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::prefs::PrefsCommand;
use crate::commands::request::RequestArgs;
use crate::commands::resource::ResourceCommand;
use crate::commands::session::SessionCommand;

/// Command line client for the campus admin API.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(author, version = env!("CAMPUS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings. Flags override `CAMPUS_API_URL`,
/// `CAMPUS_API_TIMEOUT_MS` and `CAMPUS_DISABLE_REFRESH`.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// API base URL, e.g. https://api.example.edu/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Do not exchange the refresh token after a 401
    #[arg(long, global = true)]
    pub no_refresh: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign out and inspect the stored session
    Session(SessionCommand),

    /// Display preferences (theme, language)
    Prefs(PrefsCommand),

    /// Send a raw request through the authenticated pipeline
    Request(RequestArgs),

    /// List, fetch and edit resources
    Resource(ResourceCommand),
}
