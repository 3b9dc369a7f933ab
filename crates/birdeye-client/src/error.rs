//! Error types for Birdeye API operations

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error types for client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input rejected before any I/O
    #[error("invalid input: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The request could not be executed (connection, timeout, body read)
    #[error("birdeye request to {path} failed: {source}")]
    Transport {
        /// API path being requested
        path: String,
        /// Underlying transport failure
        #[source]
        source: BoxError,
    },

    /// The API answered with a non-200 status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body did not match the envelope shape
    #[error("unmarshal response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed envelope with `success: false`
    #[error("birdeye api error: {message}")]
    Application {
        /// Server-supplied message, or a generic one
        message: String,
    },

    /// The cancellation token fired before the operation completed
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

// Helper methods for common error construction
impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error for `path`
    pub fn transport(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create an application error from the envelope message
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// The HTTP-level error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// True for a 404 response
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    /// True for a 429 response
    pub fn is_rate_limited(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_rate_limited)
    }

    /// True if the operation was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error response from the Birdeye API.
///
/// Produced for every terminal HTTP status other than 200. The classification
/// predicates overlap: a 404 is both `is_not_found` and `is_client_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code returned
    pub status_code: u16,
    /// Response body, as text
    pub message: String,
    /// API path that returned the error
    pub path: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status_code: u16, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// 429 Too Many Requests
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    /// Any 5xx status
    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }

    /// Any 4xx status, including 404 and 429
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "birdeye api error: {} returned status {}: {}",
            self.path, self.status_code, self.message
        )
    }
}

impl StdError for ApiError {}

/// Find the first [`ApiError`] in an error's source chain.
///
/// Works through any number of wrapping layers, e.g. `anyhow` context or
/// caller-defined error enums that expose the client error via `source()`.
pub fn as_api_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ApiError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            return Some(api);
        }
        if let Some(api) = e.downcast_ref::<Error>().and_then(Error::api_error) {
            return Some(api);
        }
        current = e.source();
    }
    None
}
