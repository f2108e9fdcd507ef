//! API host URL type.

use std::fmt;
use url::Url;

use crate::error::{ConfigurationError, Error};
use crate::http::{API_PREFIX, TOKEN_PATH, TOKEN_QUERY};

/// A validated mnubo API base URL (e.g. `https://rest.sandbox.mnubo.com`).
///
/// The URL must be absolute, use `http` or `https`, and carry a host. A
/// trailing slash is dropped so endpoint URLs are built without `//`.
///
/// # Example
///
/// ```
/// use mnubo::HostUrl;
///
/// let host = HostUrl::new("https://rest.sandbox.mnubo.com/").unwrap();
/// assert_eq!(host.api_url(), "https://rest.sandbox.mnubo.com/api/v3/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostUrl(Url);

impl HostUrl {
    /// Create a new host URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidHostname`] if the URL is not
    /// usable as an API base.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(invalid(s, "must be an absolute URL"));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(s, "must use http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid(s, "must have a host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(s, "must not carry a query or fragment"));
        }

        Ok(Self(url))
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Root of the REST API, `{host}/api/v3/`.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base(), API_PREFIX)
    }

    /// URL of a resource under the REST API root.
    ///
    /// A leading `/` on `route` is ignored.
    pub fn resource_url(&self, route: &str) -> String {
        format!("{}{}", self.api_url(), route.trim_start_matches('/'))
    }

    /// Token endpoint for the client-credentials grant.
    pub fn auth_url(&self) -> String {
        format!("{}{}?{}", self.base(), TOKEN_PATH, TOKEN_QUERY)
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> Error {
    ConfigurationError::InvalidHostname {
        value: value.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_and_auth_urls() {
        let host = HostUrl::new("https://rest.sandbox.mnubo.com").unwrap();
        assert_eq!(host.api_url(), "https://rest.sandbox.mnubo.com/api/v3/");
        assert_eq!(
            host.auth_url(),
            "https://rest.sandbox.mnubo.com/oauth/token?grant_type=client_credentials&scope=ALL"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let host = HostUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(host.api_url(), "http://localhost:8080/api/v3/");
        assert_eq!(host.to_string(), "http://localhost:8080");
    }

    #[test]
    fn resource_url_ignores_leading_slash() {
        let host = HostUrl::new("https://api.example.com").unwrap();
        assert_eq!(
            host.resource_url("owners/alice"),
            "https://api.example.com/api/v3/owners/alice"
        );
        assert_eq!(
            host.resource_url("/events"),
            "https://api.example.com/api/v3/events"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let host = HostUrl::new("https://gateway.example.com/mnubo").unwrap();
        assert_eq!(host.api_url(), "https://gateway.example.com/mnubo/api/v3/");
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let err = HostUrl::new("ftp://example.com").unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::InvalidHostname { .. })
        ));
    }

    #[test]
    fn rejects_relative_url() {
        assert!(HostUrl::new("/api/v3").is_err());
        assert!(HostUrl::new("").is_err());
    }

    #[test]
    fn rejects_query() {
        assert!(HostUrl::new("https://example.com?x=1").is_err());
    }
}
