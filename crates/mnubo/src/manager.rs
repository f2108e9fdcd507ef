//! Authenticated access to the mnubo REST API.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace};

use crate::auth::{AccessToken, ClientCredentials, Clock, SystemClock};
use crate::config::ClientConfig;
use crate::error::{
    AuthenticationError, ConfigurationError, Error, HttpError, TransportError, ValidationError,
};
use crate::http::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, TokenResponse, gzip_encode};

/// Authenticated client for the mnubo REST API.
///
/// Construction validates the credentials, probes the host and fetches a
/// first access token. Every request then goes through
/// [`ensure_authenticated`](Self::ensure_authenticated), which refreshes the
/// token when it has expired before the request is built.
///
/// # Thread Safety
///
/// Managers are cheap to clone (they use internal `Arc`) and clones share
/// one token. Refreshes are serialized: concurrent callers that find the
/// token expired wait for a single refresh and then reuse its result.
///
/// # Example
///
/// ```no_run
/// use mnubo::ApiManager;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = ApiManager::connect("client-id", "client-secret", "https://rest.sandbox.mnubo.com")
///     .await?;
///
/// api.post("events", &json!([{"x_object": {"x_device_id": "dev-1"}}])).await?;
/// let owner = api.get("owners/alice@example.com").await?;
/// println!("{}", owner.text().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    credentials: ClientCredentials,
    config: ClientConfig,
    client: reqwest::Client,
    clock: Arc<dyn Clock>,
    token: RwLock<AccessToken>,
    refresh: Mutex<()>,
}

impl ApiManager {
    /// Connect with default settings (gzip compression enabled).
    ///
    /// Credentials are checked before the hostname is parsed.
    pub async fn connect(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        hostname: impl AsRef<str>,
    ) -> Result<Self, Error> {
        let credentials = ClientCredentials::new(client_id, client_secret);
        validate_credentials(&credentials)?;
        let config = ClientConfig::new(hostname)?;
        Self::new(credentials, config).await
    }

    /// Create a manager using the system clock.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError`] if a credential is empty, the HTTP client
    ///   cannot be built or the host is unreachable
    /// - [`AuthenticationError`] if the initial token request is refused
    pub async fn new(credentials: ClientCredentials, config: ClientConfig) -> Result<Self, Error> {
        Self::with_clock(credentials, config, Arc::new(SystemClock)).await
    }

    /// Create a manager that reads time from `clock`.
    #[instrument(skip_all, fields(host = %config.hostname()))]
    pub async fn with_clock(
        credentials: ClientCredentials,
        config: ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        validate_credentials(&credentials)?;

        let client = build_client(&config)?;
        probe_host(&client, &config).await?;

        let token = request_token(&client, &credentials, &config, clock.as_ref()).await?;
        info!(expires_at = %token.expires_at(), "Authenticated with mnubo");

        Ok(Self {
            inner: Arc::new(ManagerInner {
                credentials,
                config,
                client,
                clock,
                token: RwLock::new(token),
                refresh: Mutex::new(()),
            }),
        })
    }

    /// Returns the configuration this manager was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Root of the REST API, `{host}/api/v3/`.
    pub fn api_url(&self) -> String {
        self.inner.config.hostname().api_url()
    }

    /// Token endpoint for the client-credentials grant.
    pub fn auth_url(&self) -> String {
        self.inner.config.hostname().auth_url()
    }

    /// Request a new access token from the token endpoint.
    ///
    /// The stored token is left untouched; see
    /// [`ensure_authenticated`](Self::ensure_authenticated).
    #[instrument(skip(self), fields(host = %self.inner.config.hostname()))]
    pub async fn fetch_access_token(&self) -> Result<AccessToken, Error> {
        let inner = &self.inner;
        request_token(
            &inner.client,
            &inner.credentials,
            &inner.config,
            inner.clock.as_ref(),
        )
        .await
    }

    /// Returns true if the stored token is still valid.
    pub fn is_token_valid(&self) -> bool {
        self.read_token().is_valid_at(self.inner.clock.now())
    }

    /// Snapshot of the stored token.
    pub fn access_token(&self) -> AccessToken {
        self.read_token().clone()
    }

    /// Instant at which the stored token expires.
    pub fn token_expires_at(&self) -> DateTime<Utc> {
        self.read_token().expires_at()
    }

    /// Refresh the stored token if it has expired.
    ///
    /// Returns the token to use for the current call.
    #[instrument(skip(self))]
    pub async fn ensure_authenticated(&self) -> Result<AccessToken, Error> {
        if let Some(token) = self.valid_token() {
            return Ok(token);
        }

        let _refresh = self.inner.refresh.lock().await;
        if let Some(token) = self.valid_token() {
            debug!("Token already refreshed by a concurrent call");
            return Ok(token);
        }

        info!("Access token expired, refreshing");
        let token = self.fetch_access_token().await?;
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token.clone();

        debug!(expires_at = %token.expires_at(), "Access token refreshed");
        Ok(token)
    }

    /// Headers attached to every resource request for the stored token.
    pub fn authorization_header(&self) -> Result<HeaderMap, Error> {
        bearer_headers(&self.read_token())
    }

    /// Turn a non-success response into an error.
    ///
    /// 400 and 409 become [`ValidationError`], any other non-2xx status
    /// becomes [`HttpError`]. Both carry the raw response body.
    pub async fn validate_response(&self, response: Response) -> Result<Response, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| request_error(e, &self.inner.config))?;
        match status.as_u16() {
            code @ (400 | 409) => Err(ValidationError { status: code, body }.into()),
            code => Err(HttpError { status: code, body }.into()),
        }
    }

    /// Send an authenticated GET to `route`.
    #[instrument(skip(self), fields(host = %self.inner.config.hostname()))]
    pub async fn get(&self, route: &str) -> Result<Response, Error> {
        let token = self.ensure_authenticated().await?;
        let url = self.inner.config.hostname().resource_url(route);
        debug!(%url, "GET");

        let request = self.inner.client.get(&url).headers(bearer_headers(&token)?);
        self.execute(request).await
    }

    /// Send an authenticated GET to `route` with URL-encoded query parameters.
    #[instrument(skip(self, params), fields(host = %self.inner.config.hostname()))]
    pub async fn get_with_params<Q>(&self, route: &str, params: &Q) -> Result<Response, Error>
    where
        Q: Serialize + ?Sized,
    {
        let token = self.ensure_authenticated().await?;
        let url = self.inner.config.hostname().resource_url(route);
        debug!(%url, "GET");

        let request = self
            .inner
            .client
            .get(&url)
            .query(params)
            .headers(bearer_headers(&token)?);
        self.execute(request).await
    }

    /// Send an authenticated POST with a JSON body.
    ///
    /// The body is gzip-compressed when compression is enabled.
    #[instrument(skip(self, body), fields(host = %self.inner.config.hostname()))]
    pub async fn post<B>(&self, route: &str, body: &B) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, route, body).await
    }

    /// Send an authenticated PUT with a JSON body.
    ///
    /// The body is gzip-compressed when compression is enabled.
    #[instrument(skip(self, body), fields(host = %self.inner.config.hostname()))]
    pub async fn put<B>(&self, route: &str, body: &B) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, route, body).await
    }

    /// Send an authenticated DELETE to `route`.
    #[instrument(skip(self), fields(host = %self.inner.config.hostname()))]
    pub async fn delete(&self, route: &str) -> Result<Response, Error> {
        let token = self.ensure_authenticated().await?;
        let url = self.inner.config.hostname().resource_url(route);
        debug!(%url, "DELETE");

        let request = self
            .inner
            .client
            .delete(&url)
            .headers(bearer_headers(&token)?);
        self.execute(request).await
    }

    async fn send_json<B>(&self, method: Method, route: &str, body: &B) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let token = self.ensure_authenticated().await?;
        let url = self.inner.config.hostname().resource_url(route);
        let payload = serde_json::to_vec(body).map_err(Error::encoding)?;

        let request = self
            .inner
            .client
            .request(method.clone(), &url)
            .headers(bearer_headers(&token)?);

        let request = if self.inner.config.compression_enabled() {
            let compressed = gzip_encode(&payload).map_err(Error::encoding)?;
            debug!(%method, %url, raw = payload.len(), gzip = compressed.len(), "Sending body");
            request.header(CONTENT_ENCODING, "gzip").body(compressed)
        } else {
            debug!(%method, %url, raw = payload.len(), "Sending body");
            request.body(payload)
        };

        self.execute(request).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| request_error(e, &self.inner.config))?;
        self.validate_response(response).await
    }

    fn valid_token(&self) -> Option<AccessToken> {
        let token = self.read_token();
        token
            .is_valid_at(self.inner.clock.now())
            .then(|| token.clone())
    }

    fn read_token(&self) -> RwLockReadGuard<'_, AccessToken> {
        // Tokens are replaced wholesale, so a poisoned lock still holds a whole token.
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate_credentials(credentials: &ClientCredentials) -> Result<(), Error> {
    if credentials.client_id().is_empty() {
        return Err(ConfigurationError::MissingClientId.into());
    }
    if credentials.client_secret().is_empty() {
        return Err(ConfigurationError::MissingClientSecret.into());
    }
    Ok(())
}

fn build_client(config: &ClientConfig) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| {
        ConfigurationError::HttpClient {
            message: e.to_string(),
        }
        .into()
    })
}

/// Any HTTP answer counts as reachable; only failing to connect does not.
async fn probe_host(client: &reqwest::Client, config: &ClientConfig) -> Result<(), Error> {
    let host = config.hostname();
    match client.head(host.as_url().as_str()).send().await {
        Ok(response) => {
            trace!(status = %response.status(), "Host probe answered");
            Ok(())
        }
        Err(err) if err.is_connect() || err.is_timeout() => Err(ConfigurationError::Unreachable {
            host: host.to_string(),
            message: err.to_string(),
        }
        .into()),
        Err(err) => Err(request_error(err, config)),
    }
}

async fn request_token(
    client: &reqwest::Client,
    credentials: &ClientCredentials,
    config: &ClientConfig,
    clock: &dyn Clock,
) -> Result<AccessToken, Error> {
    let url = config.hostname().auth_url();
    debug!("Requesting access token");

    let issued_at = clock.now();
    let response = client
        .post(&url)
        .header(AUTHORIZATION, credentials.basic_authorization())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .send()
        .await
        .map_err(|e| request_error(e, config))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(e, config))?;

    // The status wins over the body: a broken error page is still a refusal.
    if status.is_client_error() || status.is_server_error() {
        return Err(AuthenticationError::Rejected {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let parsed: TokenResponse = serde_json::from_str(&body).map_err(malformed)?;
    let expires_in = Duration::try_seconds(parsed.expires_in)
        .filter(|d| *d >= Duration::zero())
        .filter(|d| issued_at.checked_add_signed(*d).is_some())
        .ok_or_else(|| malformed(format!("expires_in out of range: {}", parsed.expires_in)))?;

    let token = AccessToken::new(parsed.access_token, expires_in, issued_at);
    bearer_headers(&token)?;
    Ok(token)
}

fn bearer_headers(token: &AccessToken) -> Result<HeaderMap, Error> {
    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|_| malformed("access token contains invalid header characters"))?;
    auth_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(AUTHORIZATION, auth_value);
    Ok(headers)
}

fn malformed(message: impl ToString) -> Error {
    AuthenticationError::MalformedResponse {
        message: message.to_string(),
    }
    .into()
}

/// Builder failures are bad request input; everything else is transport.
fn request_error(err: reqwest::Error, config: &ClientConfig) -> Error {
    if err.is_builder() {
        Error::encoding(err)
    } else {
        TransportError::from_reqwest(err, config.timeout()).into()
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for ApiManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiManager")
            .field("host", &self.inner.config.hostname())
            .field("compression_enabled", &self.inner.config.compression_enabled())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
