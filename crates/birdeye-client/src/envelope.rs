//! Birdeye response envelope decoding
//!
//! Every Birdeye endpoint wraps its payload as
//! `{"success": bool, "message": "...", "data": ...}`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Message used when the server reports failure without saying why
const GENERIC_FAILURE: &str = "birdeye api returned success=false";

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Decode an envelope and return its `data` as `T`.
///
/// Malformed JSON or a `data` that does not fit `T` is [`Error::Decode`];
/// `success: false` is [`Error::Application`]. Missing or null `data` is
/// decoded as JSON null, which suits `Option<_>` and `()` targets. Numbers
/// in `data` reach `T` with their original digits, so decimal targets lose
/// no precision.
pub fn parse_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Envelope = serde_json::from_slice(body)?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(Error::application(message));
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(data)?)
}
