//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{delete, get, send, token};

/// Sandbox API used when no host is given.
pub const DEFAULT_HOST: &str = "https://rest.sandbox.mnubo.com";

/// mnubo CLI tool for REST API exploration.
#[derive(Parser, Debug)]
#[command(name = "mnubo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach and authenticate against the API.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "MNUBO_HOST", default_value = DEFAULT_HOST, global = true)]
    pub host: String,

    /// OAuth2 client id
    #[arg(long, env = "MNUBO_CLIENT_ID", hide_env_values = true, global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "MNUBO_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Send POST and PUT bodies without gzip compression
    #[arg(long, global = true)]
    pub no_compression: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and show the access token lifetime
    Token(token::TokenArgs),

    /// GET a resource
    Get(get::GetArgs),

    /// POST a JSON body to a resource
    Post(send::SendArgs),

    /// PUT a JSON body to a resource
    Put(send::SendArgs),

    /// DELETE a resource
    Delete(delete::DeleteArgs),
}
