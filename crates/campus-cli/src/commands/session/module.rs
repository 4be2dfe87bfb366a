//! Selected module command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use campus_core::Module;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Module to switch to; prints the current one when omitted
    pub module: Option<Module>,
}

pub fn run(ctx: &Context, args: ModuleArgs) -> Result<()> {
    ctx.require_session()?;

    match args.module {
        Some(module) => {
            ctx.session()
                .set_selected_module(module)
                .context("Failed to save module")?;
            output::success(&format!("Switched to {}", module));
        }
        None => match ctx.session().selected_module() {
            Some(module) => println!("{}", module),
            None => output::note("No module selected."),
        },
    }

    Ok(())
}
