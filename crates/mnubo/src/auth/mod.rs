//! Authentication types.
//!
//! This module provides the OAuth2 client-credentials primitives used by
//! [`ApiManager`](crate::ApiManager): the long-lived [`ClientCredentials`]
//! and the short-lived [`AccessToken`] they are exchanged for.

mod clock;
mod credentials;
mod tokens;

pub use clock::{Clock, SystemClock};
pub use credentials::ClientCredentials;
pub use tokens::AccessToken;
