//! Typed Birdeye endpoints
//!
//! Each endpoint is a method on [`Client`](crate::Client) built from
//! [`Client::get_json`](crate::Client::get_json) or
//! [`Client::get_multiple`](crate::Client::get_multiple).

pub mod price;
pub mod token_overview;
pub mod token_security;

pub use price::PriceData;
pub use token_overview::{TokenExtensions, TokenOverview};
pub use token_security::{TokenSecurity, TransferFeeData};

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Reject an empty address before any request is made
pub(crate) fn require_address(path: &str, address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(Error::validation(format!("{path}: address is required")));
    }
    Ok(())
}

/// Decode JSON null as the type's zero value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
