//! Create, update and patch command implementations.

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;

use super::ResourceKind;
use super::kind::dispatch;
use crate::commands::read_json;
use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub kind: ResourceKind,

    /// JSON file with the item (use - for stdin)
    #[arg(long)]
    pub json: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub kind: ResourceKind,

    pub id: String,

    /// JSON file with the item or fields (use - for stdin)
    #[arg(long)]
    pub json: String,
}

pub async fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    ctx.require_session()?;
    let value = read_json(&args.json)?;

    let created: Value = dispatch!(args.kind, R => {
        let item: R = serde_json::from_value(value)
            .with_context(|| format!("Input is not a valid {}", args.kind.singular()))?;
        let created = ctx
            .client
            .resource::<R>()
            .create(&item)
            .await
            .with_context(|| format!("Failed to create {}", args.kind.singular()))?;
        serde_json::to_value(created)?
    });

    output::json(&created, false)?;
    output::success(&format!("Created {}", args.kind.singular()));
    Ok(())
}

pub async fn update(ctx: &Context, args: UpdateArgs) -> Result<()> {
    ctx.require_session()?;
    let value = read_json(&args.json)?;

    let updated: Value = dispatch!(args.kind, R => {
        let item: R = serde_json::from_value(value)
            .with_context(|| format!("Input is not a valid {}", args.kind.singular()))?;
        let updated = ctx
            .client
            .resource::<R>()
            .update(&args.id, &item)
            .await
            .with_context(|| format!("Failed to update {} {}", args.kind.singular(), args.id))?;
        serde_json::to_value(updated)?
    });

    output::json(&updated, false)?;
    output::success(&format!("Updated {} {}", args.kind.singular(), args.id));
    Ok(())
}

pub async fn patch(ctx: &Context, args: UpdateArgs) -> Result<()> {
    ctx.require_session()?;
    let fields = read_json(&args.json)?;
    anyhow::ensure!(fields.is_object(), "Patch input must be a JSON object");

    let patched: Value = dispatch!(args.kind, R => {
        let patched = ctx
            .client
            .resource::<R>()
            .patch(&args.id, &fields)
            .await
            .with_context(|| format!("Failed to patch {} {}", args.kind.singular(), args.id))?;
        serde_json::to_value(patched)?
    });

    output::json(&patched, false)?;
    output::success(&format!("Patched {} {}", args.kind.singular(), args.id));
    Ok(())
}
