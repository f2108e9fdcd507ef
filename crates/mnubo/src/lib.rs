//! mnubo - Authenticated client for the mnubo REST API
//!
//! This library wraps the OAuth2 client-credentials flow and the `/api/v3`
//! resource endpoints. All requests flow through an [`ApiManager`], which
//! keeps an access token fresh and turns error responses into typed
//! [`Error`] variants.
//!
//! # Example
//!
//! ```no_run
//! use mnubo::{ApiManager, ClientConfig, ClientCredentials};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), mnubo::Error> {
//! let credentials = ClientCredentials::new("client-id", "client-secret");
//! let config = ClientConfig::new("https://rest.sandbox.mnubo.com")?.with_compression(true);
//! let api = ApiManager::new(credentials, config).await?;
//!
//! api.put("owners/alice@example.com", &json!({"x_password": "hunter2"})).await?;
//!
//! let created = api.post("owners", &json!({"username": "alice@example.com"})).await;
//! if let Err(mnubo::Error::Validation(err)) = &created {
//!     eprintln!("rejected: {}", err.body);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

mod manager;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, ClientCredentials, Clock, SystemClock};
pub use config::ClientConfig;
pub use error::Error;
pub use manager::ApiManager;
pub use reqwest::{Response, StatusCode};
pub use types::HostUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
