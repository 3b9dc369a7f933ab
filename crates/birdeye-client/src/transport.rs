//! HTTP transport abstractions
//!
//! [`Transport`] is the HTTP-executing capability the [`Client`](crate::Client)
//! sends requests through. The default is [`RetryingTransport`], which applies
//! a [`RetryPolicy`]. A plain `reqwest::Client` is also a transport; it makes
//! a single attempt per request and leaves retries to the caller.

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::sync::Once;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::error::BoxError;
use crate::retry::{self, RetryPolicy};

/// Executes a fully built HTTP request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response, whatever its status
    async fn execute(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response, BoxError> {
        Ok(Self::execute(self, request).await?)
    }
}

/// Install the ring crypto provider for rustls once per process
pub fn ensure_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        // Err means another provider is already installed, which is fine
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Build the reqwest client used by the default transport.
///
/// A zero `timeout` means requests have no overall deadline.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    ensure_crypto_provider();
    let mut builder = Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(10);
    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Transport that retries transient failures with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingTransport {
    /// Wrap `client` with `policy`
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// The active retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl Transport for RetryingTransport {
    async fn execute(&self, request: Request) -> Result<Response, BoxError> {
        let max_retries = self.policy.max_retries;
        let mut retry_after = None;
        let mut attempt = 0u32;

        loop {
            if attempt > 0 {
                let backoff = self.policy.backoff(attempt - 1, retry_after.take());
                debug!("Retry attempt {} after {:?} backoff", attempt, backoff);
                sleep(backoff).await;
            }

            // GET requests have no body, so cloning only fails for
            // caller-built streaming requests; those get a single attempt.
            let Some(attempt_request) = request.try_clone() else {
                debug!("Request body is not cloneable, sending once");
                return Ok(self.client.execute(request).await?);
            };

            trace!(
                "HTTP {} {} (attempt {})",
                request.method(),
                request.url().path(),
                attempt + 1
            );

            match self.client.execute(attempt_request).await {
                Ok(response) => {
                    let status = response.status();
                    trace!("Response status: {}", status);

                    if !RetryPolicy::should_retry_status(status) || attempt >= max_retries {
                        return Ok(response);
                    }

                    warn!(
                        "Request returned {} (attempt {}): will retry",
                        status,
                        attempt + 1
                    );
                    retry_after = retry::retry_after(response.headers());
                    // Release the connection before sleeping
                    drop(response);
                }
                Err(e) => {
                    if !RetryPolicy::should_retry_error(&e) || attempt >= max_retries {
                        debug!(
                            "Request failed (attempt {}): {}, not retrying",
                            attempt + 1,
                            e
                        );
                        return Err(e.into());
                    }

                    warn!(
                        "Request failed (attempt {}): {}, will retry",
                        attempt + 1,
                        e
                    );
                }
            }

            attempt += 1;
        }
    }
}
