//! Client configuration.

use std::time::Duration;

use crate::error::Error;
use crate::types::HostUrl;

/// Request timeout applied when none is configured explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("mnubo/", env!("CARGO_PKG_VERSION"));

/// Settings fixed for the lifetime of an [`ApiManager`](crate::ApiManager).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use mnubo::ClientConfig;
///
/// let config = ClientConfig::new("https://rest.sandbox.mnubo.com")
///     .unwrap()
///     .with_compression(false)
///     .with_timeout(Some(Duration::from_secs(5)));
/// assert!(!config.compression_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    hostname: HostUrl,
    compression_enabled: bool,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientConfig {
    /// Parse `hostname` and build a configuration with default settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the hostname is not a valid URL.
    pub fn new(hostname: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self::from_host(HostUrl::new(hostname)?))
    }

    /// Build a configuration with default settings for a validated host.
    pub fn from_host(hostname: HostUrl) -> Self {
        Self {
            hostname,
            compression_enabled: true,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Enable or disable gzip compression of POST and PUT bodies.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compression_enabled = enabled;
        self
    }

    /// Set the per-request timeout. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `user-agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn hostname(&self) -> &HostUrl {
        &self.hostname
    }

    pub fn compression_enabled(&self) -> bool {
        self.compression_enabled
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://rest.sandbox.mnubo.com").unwrap();
        assert!(config.compression_enabled());
        assert_eq!(config.timeout(), Some(DEFAULT_TIMEOUT));
        assert!(config.user_agent().starts_with("mnubo/"));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new("http://localhost:9000")
            .unwrap()
            .with_compression(false)
            .with_timeout(None)
            .with_user_agent("ingest-job/2.1");

        assert!(!config.compression_enabled());
        assert_eq!(config.timeout(), None);
        assert_eq!(config.user_agent(), "ingest-job/2.1");
        assert_eq!(config.hostname().host(), Some("localhost"));
    }

    #[test]
    fn invalid_hostname_is_rejected() {
        assert!(ClientConfig::new("not a url").is_err());
    }
}
