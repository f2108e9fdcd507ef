//! Token command implementation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use mnubo::ApiManager;

use crate::output;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Print the token lifetime as JSON
    #[arg(long)]
    pub json: bool,
}

/// Token lifetime; the token value itself is never printed.
#[derive(Debug, Serialize)]
struct TokenInfo {
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    expires_in: i64,
}

pub async fn run(api: &ApiManager, args: TokenArgs) -> Result<()> {
    let token = api.ensure_authenticated().await?;
    let info = TokenInfo {
        issued_at: token.issued_at(),
        expires_at: token.expires_at(),
        expires_in: token.expires_in().num_seconds(),
    };

    if args.json {
        return output::json_pretty(&info);
    }

    output::success("Authenticated successfully");
    println!();
    output::field("Host", &api.config().hostname().to_string());
    output::field("Issued at", &info.issued_at.to_rfc3339());
    output::field("Expires at", &info.expires_at.to_rfc3339());
    output::field("Lifetime", &format!("{}s", info.expires_in));

    Ok(())
}
