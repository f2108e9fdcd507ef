//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mnubo::ApiManager;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Route under /api/v3 (e.g., objects/dev-1)
    pub route: String,
}

pub async fn run(api: &ApiManager, args: DeleteArgs) -> Result<()> {
    let response = api
        .delete(&args.route)
        .await
        .with_context(|| format!("DELETE {} failed", args.route))?;

    output::success(&format!("Deleted {}", args.route));
    output::response(response).await
}
