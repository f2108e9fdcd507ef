//! Client credentials type.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// OAuth2 client credentials issued by mnubo.
///
/// This type holds the client id and client secret that are exchanged for
/// short-lived access tokens.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use mnubo::ClientCredentials;
///
/// let creds = ClientCredentials::new("my-client", "my-secret");
/// assert_eq!(creds.client_id(), "my-client");
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Create new credentials.
    ///
    /// Emptiness is checked when a client is constructed, not here.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Value of the `Authorization` header sent to the token endpoint.
    pub(crate) fn basic_authorization(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_secret_in_debug() {
        let creds = ClientCredentials::new("client-a", "s3cr3t");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("client-a"));
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn basic_authorization_encodes_id_and_secret() {
        let creds = ClientCredentials::new("id", "secret");
        // base64("id:secret")
        assert_eq!(creds.basic_authorization(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn basic_authorization_pads() {
        let creds = ClientCredentials::new("a", "b");
        assert_eq!(creds.basic_authorization(), "Basic YTpi");
        let creds = ClientCredentials::new("ab", "c");
        assert_eq!(creds.basic_authorization(), "Basic YWI6Yw==");
    }
}
