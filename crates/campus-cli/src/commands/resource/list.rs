//! List command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;

use campus_core::Resource;
use campus_core::resources::ListQuery;

use super::ResourceKind;
use super::kind::dispatch;
use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    pub kind: ResourceKind,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Maximum number of items per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    ctx.require_session()?;

    let query = ListQuery {
        page: args.page,
        limit: args.limit,
        search: args.search.clone(),
    };

    let items: Vec<Value> = dispatch!(args.kind, R => {
        let items = ctx
            .client
            .resource::<R>()
            .list(&query)
            .await
            .with_context(|| format!("Failed to list {}", R::COLLECTION))?;
        items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, serde_json::Error>>()?
    });

    if items.is_empty() {
        output::note("No items found.");
        return Ok(());
    }

    for item in &items {
        output::json(item, args.pretty)?;
    }

    Ok(())
}
