//! # birdeye-client - Async client for the Birdeye DeFi analytics API
//!
//! The crate is built around a small request pipeline:
//!
//! 1. **Client construction** ([`Client::builder`]): defaults, environment
//!    overrides and setter calls resolve into a [`ClientConfig`]
//! 2. **Retrying transport** ([`RetryingTransport`]): connection failures,
//!    timeouts, 429 and 5xx responses are retried with exponential backoff
//! 3. **Envelope decoding** ([`parse_response`]): Birdeye's
//!    `{"success", "message", "data"}` wrapper is checked and unwrapped
//! 4. **Batching** ([`Client::get_multiple`]): multi-key lookups are split into
//!    chunks of [`MAX_BATCH_SIZE`]
//!
//! Typed endpoints for prices, token overviews and token security are built on
//! top of the same primitives.
//!
//! ## Example
//!
//! ```rust,no_run
//! use birdeye_client::{CancellationToken, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key")?;
//!     let cancel = CancellationToken::new();
//!
//!     let price = client
//!         .get_price(&cancel, "So11111111111111111111111111111111111111112")
//!         .await?;
//!     println!("SOL: ${}", price.value);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`Error`]. HTTP failures carry an [`ApiError`],
//! which [`as_api_error`] can find through any number of wrapping layers:
//!
//! ```rust,no_run
//! # use birdeye_client::{CancellationToken, Client, as_api_error};
//! # async fn run(client: Client) {
//! let cancel = CancellationToken::new();
//! if let Err(err) = client.get_token_overview(&cancel, "TokenMint").await {
//!     if let Some(api) = as_api_error(&err) {
//!         if api.is_not_found() {
//!             println!("token unknown to birdeye");
//!         }
//!     }
//! }
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod logger;
pub mod retry;
pub mod transport;

pub use batch::MAX_BATCH_SIZE;
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use endpoints::{
    PriceData, TokenExtensions, TokenOverview, TokenSecurity, TransferFeeData,
};
pub use envelope::parse_response;
pub use error::{ApiError, BoxError, Error, Result, as_api_error};
pub use logger::{Fields, Logger, NoopLogger, TracingLogger};
pub use retry::RetryPolicy;
pub use transport::{RetryingTransport, Transport, ensure_crypto_provider};

// Re-exported so callers do not need direct tokio-util or rust_decimal dependencies
pub use rust_decimal::Decimal;
pub use tokio_util::sync::CancellationToken;
