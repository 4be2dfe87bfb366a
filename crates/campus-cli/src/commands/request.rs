//! Raw request command implementation.

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use campus_core::{ApiRequest, Method, RequestOptions};

use super::read_json;
use crate::output;
use crate::session::Context;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
            HttpMethod::Put => Method::Put,
            HttpMethod::Patch => Method::Patch,
            HttpMethod::Delete => Method::Delete,
        }
    }
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    pub method: HttpMethod,

    /// Path relative to the API base URL, e.g. rooms/42
    pub path: String,

    /// JSON file with the request body (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,

    /// Query parameters as a JSON object
    #[arg(long)]
    pub query: Option<String>,

    /// Extra header, NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: RequestArgs) -> Result<()> {
    let method = Method::from(args.method);
    let mut request = ApiRequest::new(method, &args.path).context("Invalid path")?;

    if let Some(ref source) = args.json {
        request = request.with_body(&read_json(source)?)?;
    }
    if let Some(ref query) = args.query {
        let query: Value = serde_json::from_str(query).context("Invalid query JSON")?;
        request = request.with_query(&query).context("Invalid query")?;
    }

    let mut options = RequestOptions::default();
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Header must be NAME:VALUE, got '{}'", header))?;
        options = options.header(name.trim(), value.trim());
    }

    let data: Value = ctx
        .client
        .send(request, options)
        .await
        .with_context(|| format!("{} {} failed", method, args.path))?;

    output::json(&data, args.pretty)
}
