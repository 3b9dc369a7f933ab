//! Token price lookups

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

use super::{null_as_default, require_address};
use crate::client::Client;
use crate::error::Result;

const PRICE_PATH: &str = "/defi/price";
const MULTI_PRICE_PATH: &str = "/defi/multi_price";

/// Current price of a single token.
///
/// Numeric fields accept JSON numbers or quoted strings and keep every digit
/// the API sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceData {
    /// Price in USD
    #[serde(deserialize_with = "null_as_default")]
    pub value: Decimal,

    /// When the price was last updated (Unix seconds)
    #[serde(deserialize_with = "null_as_default")]
    pub update_unix_time: i64,

    /// Human-readable form of `update_unix_time`
    #[serde(deserialize_with = "null_as_default")]
    pub update_human_time: String,

    /// 24-hour price change, in percent
    #[serde(deserialize_with = "null_as_default")]
    pub price_change_24h: Decimal,
}

impl Client {
    /// Fetch the current price of one token
    pub async fn get_price(&self, cancel: &CancellationToken, address: &str) -> Result<PriceData> {
        require_address(PRICE_PATH, address)?;

        let price: PriceData = self
            .get_json(cancel, PRICE_PATH, &[("address", address)])
            .await?;

        self.logger().debug(
            "fetched token price",
            &[
                ("address", &address),
                ("price", &price.value),
                ("change_24h", &price.price_change_24h),
            ],
        );

        Ok(price)
    }

    /// Fetch prices for any number of tokens.
    ///
    /// Requests are batched; tokens the API has no price for are left out of
    /// the result.
    pub async fn get_multiple_prices<S: AsRef<str>>(
        &self,
        cancel: &CancellationToken,
        addresses: &[S],
    ) -> Result<HashMap<String, Decimal>> {
        let prices: HashMap<String, Option<Decimal>> = self
            .get_multiple(cancel, MULTI_PRICE_PATH, "list_address", addresses)
            .await?;

        let prices: HashMap<String, Decimal> = prices
            .into_iter()
            .filter_map(|(address, price)| price.map(|p| (address, p)))
            .collect();

        self.logger().debug(
            "fetched multiple token prices",
            &[("requested", &addresses.len()), ("received", &prices.len())],
        );

        Ok(prices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::envelope::parse_response;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn test_price_data_decodes_wire_names() {
        let body = br#"{"success":true,"data":{"value":101.25,"updateUnixTime":1703980800,"updateHumanTime":"2023-12-31T00:00:00","priceChange24h":-2.5}}"#;
        let price: PriceData = parse_response(body).expect("Operation should succeed");
        assert_eq!(price.value, dec("101.25"));
        assert_eq!(price.update_unix_time, 1_703_980_800);
        assert_eq!(price.update_human_time, "2023-12-31T00:00:00");
        assert_eq!(price.price_change_24h, dec("-2.5"));
    }

    #[test]
    fn test_price_envelope_at_defi_price() {
        let body = br#"{"success":true,"data":{"value":1.5,"updateUnixTime":1703980800,"priceChange24h":5.25}}"#;
        let price: PriceData = parse_response(body).expect("Operation should succeed");
        assert_eq!(
            price,
            PriceData {
                value: dec("1.5"),
                update_unix_time: 1_703_980_800,
                update_human_time: String::new(),
                price_change_24h: dec("5.25"),
            }
        );
    }

    #[test]
    fn test_price_keeps_digits_beyond_f64() {
        let body = br#"{"success":true,"data":{"value":0.1234567890123456789,"priceChange24h":"-3.000000000000000001"}}"#;
        let price: PriceData = parse_response(body).expect("Operation should succeed");
        assert_eq!(price.value.to_string(), "0.1234567890123456789");
        assert_eq!(price.price_change_24h.to_string(), "-3.000000000000000001");
    }

    #[test]
    fn test_price_accepts_quoted_numbers() {
        let body = br#"{"success":true,"data":{"value":"1.5","updateUnixTime":1703980800,"priceChange24h":"5.25"}}"#;
        let price: PriceData = parse_response(body).expect("Operation should succeed");
        assert_eq!(price.value, dec("1.5"));
        assert_eq!(price.price_change_24h, dec("5.25"));
    }

    #[test]
    fn test_price_data_missing_fields_are_zero() {
        let price: PriceData = parse_response(br#"{"success":true,"data":{"value":null}}"#).unwrap();
        assert_eq!(price, PriceData::default());
    }

    #[tokio::test]
    async fn test_empty_address_rejected() {
        let client = Client::builder("k")
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        let err = client
            .get_price(&CancellationToken::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));
    }
}
