//! Resource subcommand implementations.

mod kind;
mod list;
mod write;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

pub use kind::ResourceKind;

use crate::output;
use crate::session::Context;
use kind::dispatch;

#[derive(Args, Debug)]
pub struct ResourceCommand {
    #[command(subcommand)]
    pub command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceSubcommand {
    /// List a collection
    List(list::ListArgs),

    /// Fetch a single item
    Get(ItemArgs),

    /// Create an item from JSON (validated before sending)
    Create(write::CreateArgs),

    /// Replace an item from JSON (validated before sending)
    Update(write::UpdateArgs),

    /// Change some fields of an item
    Patch(write::UpdateArgs),

    /// Delete an item
    Delete(ItemArgs),
}

#[derive(Args, Debug)]
pub struct ItemArgs {
    pub kind: ResourceKind,

    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn handle(ctx: &Context, cmd: ResourceCommand) -> Result<()> {
    match cmd.command {
        ResourceSubcommand::List(args) => list::run(ctx, args).await,
        ResourceSubcommand::Get(args) => get(ctx, args).await,
        ResourceSubcommand::Create(args) => write::create(ctx, args).await,
        ResourceSubcommand::Update(args) => write::update(ctx, args).await,
        ResourceSubcommand::Patch(args) => write::patch(ctx, args).await,
        ResourceSubcommand::Delete(args) => delete(ctx, args).await,
    }
}

async fn get(ctx: &Context, args: ItemArgs) -> Result<()> {
    ctx.require_session()?;

    let item: Value = dispatch!(args.kind, R => {
        let item = ctx
            .client
            .resource::<R>()
            .get(&args.id)
            .await
            .with_context(|| format!("Failed to fetch {} {}", args.kind.singular(), args.id))?;
        serde_json::to_value(item)?
    });

    output::json(&item, args.pretty)
}

async fn delete(ctx: &Context, args: ItemArgs) -> Result<()> {
    ctx.require_session()?;

    dispatch!(args.kind, R => ctx.client.resource::<R>().delete(&args.id).await)
        .with_context(|| format!("Failed to delete {} {}", args.kind.singular(), args.id))?;

    output::success(&format!("Deleted {} {}", args.kind.singular(), args.id));
    Ok(())
}
