//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mnubo::ApiManager;

use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Route under /api/v3 (e.g., owners/alice@example.com)
    pub route: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

pub async fn run(api: &ApiManager, args: GetArgs) -> Result<()> {
    let response = if args.params.is_empty() {
        api.get(&args.route).await
    } else {
        api.get_with_params(&args.route, &args.params).await
    }
    .with_context(|| format!("GET {} failed", args.route))?;

    output::response(response).await
}
