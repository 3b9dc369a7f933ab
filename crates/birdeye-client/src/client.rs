//! Birdeye API client

use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderName, HeaderValue};
use reqwest::{Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::envelope::parse_response;
use crate::error::{ApiError, Error, Result};
use crate::logger::{Logger, NoopLogger};
use crate::retry::RetryPolicy;
use crate::transport::{RetryingTransport, Transport, build_http_client};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Header selecting the chain
const CHAIN_HEADER: &str = "x-chain";

/// The only chain this client queries
const CHAIN: &str = "solana";

/// Longest body preview written to the error log, in characters
const MAX_LOG_BODY: usize = 500;

/// Client for the Birdeye public API.
///
/// Cheap to clone; clones share the transport and logger. All operations take
/// a [`CancellationToken`] which aborts the request, including any pending
/// retries, when cancelled.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn Logger>,
    config: ClientConfig,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Start building a client
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client from `BIRDEYE_API_KEY` and the `BIRDEYE_*` overrides
    /// read by [`ClientConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BIRDEYE_API_KEY").unwrap_or_default();
        Self::builder(api_key)
            .config(ClientConfig::from_env())
            .build()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Settings the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Perform a GET request and return the raw body of a 200 response.
    ///
    /// `params` are form-encoded into the query string in the order given.
    /// Any other status becomes an [`ApiError`] carrying the body text.
    pub async fn get_raw(
        &self,
        cancel: &CancellationToken,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Bytes> {
        let request = self.build_request(path, params)?;

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = self.send(path, request) => result,
        }
    }

    /// Perform a GET request and decode the `data` field of the envelope
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.get_raw(cancel, path, params).await?;
        parse_response(&body)
    }

    fn build_request(&self, path: &str, params: &[(&str, &str)]) -> Result<Request> {
        let mut raw = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter().copied())
                .finish();
            raw.push('?');
            raw.push_str(&query);
        }

        let url = Url::parse(&raw)
            .map_err(|e| Error::validation(format!("invalid request url {raw:?}: {e}")))?;

        let mut api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| Error::validation("api key is not a valid header value"))?;
        api_key.set_sensitive(true);

        let mut request = Request::new(Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(CHAIN_HEADER),
            HeaderValue::from_static(CHAIN),
        );

        Ok(request)
    }

    async fn send(&self, path: &str, request: Request) -> Result<Bytes> {
        self.logger
            .debug("birdeye api request", &[("method", &"GET"), ("path", &path)]);

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                self.logger
                    .error("birdeye api request failed", &[("path", &path), ("error", &e)]);
                return Err(Error::transport(path, e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                self.logger
                    .error("birdeye api request failed", &[("path", &path), ("error", &e)]);
                return Err(Error::transport(path, e));
            }
        };

        if status != StatusCode::OK {
            let message = String::from_utf8_lossy(&body).into_owned();
            let preview = truncate_for_log(&message, MAX_LOG_BODY);
            self.logger.error(
                "birdeye api error response",
                &[
                    ("path", &path),
                    ("status_code", &status.as_u16()),
                    ("body", &preview),
                ],
            );
            return Err(ApiError::new(status.as_u16(), message, path).into());
        }

        Ok(body)
    }
}

/// Shorten `s` to at most `max` characters, marking the cut
pub(crate) fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...(truncated)", &s[..cut]),
        None => s.to_string(),
    }
}

/// Builder for [`Client`].
///
/// Setters apply in call order and each one overwrites what an earlier call
/// set. [`config`](Self::config) replaces every setting at once.
pub struct ClientBuilder {
    api_key: String,
    config: ClientConfig,
    logger: Option<Arc<dyn Logger>>,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .field("custom_logger", &self.logger.is_some())
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl ClientBuilder {
    /// Create a builder with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            config: ClientConfig::default(),
            logger: None,
            transport: None,
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-attempt request timeout (zero disables it)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the bounds of the wait between retries
    #[must_use]
    pub fn retry_wait(mut self, min: Duration, max: Duration) -> Self {
        self.config.retry_wait_min = min;
        self.config.retry_wait_max = max;
        self
    }

    /// Set the random spread applied to retry waits (clamped to 0.0..=1.0)
    #[must_use]
    pub fn jitter_factor(mut self, jitter_factor: f64) -> Self {
        self.config.jitter_factor = jitter_factor.clamp(0.0, 1.0);
        self
    }

    /// Replace all settings
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Route log events to `logger`
    #[must_use]
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Send requests through `client` directly.
    ///
    /// The built-in retry policy and timeout are bypassed; `client` decides
    /// both.
    #[must_use]
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(client)
    }

    /// Send requests through a custom [`Transport`], bypassing the built-in
    /// retry policy
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the API key is empty. [`Error::Transport`]
    /// if the default HTTP client cannot be constructed, for example when
    /// the TLS backend fails to initialise. A caller-supplied transport
    /// skips that step.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::validation("api key is required"));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let http = build_http_client(self.config.timeout)
                    .map_err(|e| Error::transport(self.config.base_url.clone(), e))?;
                Arc::new(RetryingTransport::new(
                    http,
                    RetryPolicy::from(&self.config),
                ))
            }
        };

        Ok(Client {
            api_key: self.api_key,
            base_url: self.config.base_url.clone(),
            transport,
            logger: self.logger.unwrap_or_else(|| Arc::new(NoopLogger)),
            config: self.config,
        })
    }
}
