//! Error types for the mnubo client.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, authentication, request validation, HTTP status and
//! transport failures.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The unified error type for mnubo operations.
///
/// Nothing is retried internally; every variant is surfaced to the caller
/// with enough context (status code, body) to diagnose the failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad constructor input or unreachable host.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The token endpoint refused to issue an access token.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// The API rejected the request as invalid (HTTP 400 or 409).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Any other non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request body could not be serialized or compressed.
    #[error("encoding error: {message}")]
    Encoding { message: String },
}

impl Error {
    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication(AuthenticationError::Rejected { status, .. }) => Some(*status),
            Error::Validation(err) => Some(err.status),
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// Returns true if the request was abandoned because it timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Timeout { .. }))
    }

    pub(crate) fn encoding(err: impl fmt::Display) -> Self {
        Error::Encoding {
            message: err.to_string(),
        }
    }
}

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The client id was empty.
    #[error("client_id cannot be null or empty")]
    MissingClientId,

    /// The client secret was empty.
    #[error("client_secret cannot be null or empty")]
    MissingClientSecret,

    /// The hostname is not a usable base URL.
    #[error("invalid hostname '{value}': {reason}")]
    InvalidHostname { value: String, reason: String },

    /// The preflight probe could not connect to the host.
    #[error("host at {host} is not reachable: {message}")]
    Unreachable { host: String, message: String },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Errors from the OAuth2 token endpoint.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The token endpoint answered with a failure status.
    #[error("token request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The token endpoint answered with an unusable token.
    #[error("malformed token response: {message}")]
    MalformedResponse { message: String },
}

/// A 400 or 409 response from a resource endpoint.
///
/// These signal a problem the caller can fix in its input; `body` is the
/// raw response content returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// HTTP status code (400 or 409).
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ValidationError {}

/// Any non-success response other than 400 and 409.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP client error.
    #[error("HTTP client error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Classify a reqwest error, recording the timeout that was in force.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Option<Duration>) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: timeout.map_or(0, |t| t.as_millis() as u64),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}
