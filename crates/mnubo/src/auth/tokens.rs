//! Access token type.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// A bearer access token obtained through the client-credentials flow.
///
/// A token is valid while `now < issued_at + expires_in`. It is replaced
/// wholesale on refresh and never mutated in place.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    expires_in: Duration,
    issued_at: DateTime<Utc>,
}

impl AccessToken {
    pub(crate) fn new(
        token: impl Into<String>,
        expires_in: Duration,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token: token.into(),
            expires_in,
            issued_at,
        }
    }

    /// Lifetime granted by the token endpoint.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Instant taken just before the token request was sent.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Instant from which the token is no longer valid.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + self.expires_in
    }

    /// Returns true if the token is still valid at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    /// Returns the token value for use in authorization headers.
    pub(crate) fn as_str(&self) -> &str {
        &self.token
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9", Duration::seconds(60), issued());
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn valid_until_expiry_boundary() {
        let token = AccessToken::new("T1", Duration::seconds(3600), issued());

        assert!(token.is_valid_at(issued()));
        assert!(token.is_valid_at(issued() + Duration::seconds(3599)));
        assert!(!token.is_valid_at(issued() + Duration::seconds(3600)));
        assert!(!token.is_valid_at(issued() + Duration::seconds(3601)));
    }

    #[test]
    fn zero_lifetime_is_never_valid() {
        let token = AccessToken::new("T1", Duration::zero(), issued());
        assert!(!token.is_valid_at(issued()));
    }

    #[test]
    fn expires_at_adds_lifetime() {
        let token = AccessToken::new("T1", Duration::seconds(90), issued());
        assert_eq!(
            token.expires_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 1, 30).unwrap()
        );
    }
}
