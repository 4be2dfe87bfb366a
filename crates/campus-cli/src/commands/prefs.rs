//! Display preference commands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use campus_core::{LanguageCode, ThemeMode};

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub command: PrefsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrefsSubcommand {
    /// Print all preferences
    Show,

    /// Show or set the theme (light, dark)
    Theme {
        mode: Option<ThemeMode>,
    },

    /// Show or set the language, e.g. en or bn-BD
    Language {
        code: Option<LanguageCode>,
    },
}

pub fn handle(ctx: &Context, cmd: PrefsCommand) -> Result<()> {
    let session = ctx.session();

    match cmd.command {
        PrefsSubcommand::Show => {
            output::field("Theme", session.theme_mode().as_str());
            output::field("Language", session.language().as_str());
        }
        PrefsSubcommand::Theme { mode: Some(mode) } => {
            session.set_theme_mode(mode).context("Failed to save theme")?;
            output::success(&format!("Theme set to {}", mode));
        }
        PrefsSubcommand::Theme { mode: None } => println!("{}", session.theme_mode()),
        PrefsSubcommand::Language { code: Some(code) } => {
            session.set_language(&code).context("Failed to save language")?;
            output::success(&format!("Language set to {}", code.as_str()));
        }
        PrefsSubcommand::Language { code: None } => println!("{}", session.language().as_str()),
    }

    Ok(())
}
