//! Output formatting helpers.

use anyhow::{Context, Result};
use colored::Colorize;
use mnubo::Response;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a response: status on stderr, body on stdout.
///
/// JSON bodies are pretty-printed; anything else is printed as received.
pub async fn response(response: Response) -> Result<()> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    eprintln!("{}", format!("HTTP {}", status).dimmed());

    if body.is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => json_pretty(&value),
        Err(_) => {
            println!("{}", body);
            Ok(())
        }
    }
}
