//! Post and put command implementations.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use mnubo::ApiManager;

use crate::output;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Route under /api/v3 (e.g., events)
    pub route: String,

    /// JSON request body
    #[arg(long, default_value = "{}")]
    pub body: String,
}

impl SendArgs {
    fn body(&self) -> Result<Value> {
        serde_json::from_str(&self.body).context("Request body is not valid JSON")
    }
}

pub async fn post(api: &ApiManager, args: SendArgs) -> Result<()> {
    let body = args.body()?;
    let response = api
        .post(&args.route, &body)
        .await
        .with_context(|| format!("POST {} failed", args.route))?;

    output::response(response).await
}

pub async fn put(api: &ApiManager, args: SendArgs) -> Result<()> {
    let body = args.body()?;
    let response = api
        .put(&args.route, &body)
        .await
        .with_context(|| format!("PUT {} failed", args.route))?;

    output::response(response).await
}
