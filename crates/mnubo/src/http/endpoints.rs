//! Endpoint paths and token endpoint wire types.

use serde::Deserialize;

/// Path of the REST API root, relative to the host.
pub const API_PREFIX: &str = "/api/v3/";

/// Path of the OAuth2 token endpoint.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Query string requesting a client-credentials token for every scope.
pub const TOKEN_QUERY: &str = "grant_type=client_credentials&scope=ALL";

/// Content type of the token request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type of every resource request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_ignores_extra_fields() {
        let body = r#"{"access_token":"T1","token_type":"bearer","expires_in":3600,"scope":"ALL"}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "T1");
        assert_eq!(parsed.expires_in, 3600);
    }

    #[test]
    fn token_response_requires_expiry() {
        let body = r#"{"access_token":"T1"}"#;
        assert!(serde_json::from_str::<TokenResponse>(body).is_err());
    }
}
