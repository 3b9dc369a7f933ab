//! Token market overview

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{null_as_default, require_address};
use crate::client::Client;
use crate::error::Result;

const TOKEN_OVERVIEW_PATH: &str = "/defi/token_overview";

/// Market data and metadata for a token.
///
/// Fields the API omits or sends as null are zero. Amounts are exact
/// decimals and may arrive as JSON numbers or quoted strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenOverview {
    /// Mint address
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,

    /// Trading symbol, e.g. "SOL"
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(deserialize_with = "null_as_default")]
    pub decimals: u32,

    #[serde(rename = "logoURI", deserialize_with = "null_as_default")]
    pub logo_uri: String,

    /// Liquidity across all pools, in USD
    #[serde(deserialize_with = "null_as_default")]
    pub liquidity: Decimal,

    /// Price in USD
    #[serde(deserialize_with = "null_as_default")]
    pub price: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub price_change_24h_percent: Decimal,

    /// 24-hour volume in token units
    #[serde(rename = "v24h", deserialize_with = "null_as_default")]
    pub volume_24h: Decimal,

    /// 24-hour volume in USD
    #[serde(rename = "v24hUSD", deserialize_with = "null_as_default")]
    pub volume_24h_usd: Decimal,

    #[serde(rename = "v24hChangePercent", deserialize_with = "null_as_default")]
    pub volume_24h_change_percent: Decimal,

    /// Market capitalization in USD
    #[serde(rename = "mc", deserialize_with = "null_as_default")]
    pub market_cap: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub supply: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub circulating_supply: Decimal,

    /// Unique holder count
    #[serde(deserialize_with = "null_as_default")]
    pub holder: u64,

    /// Trades in the last 24 hours
    #[serde(deserialize_with = "null_as_default")]
    pub trade_24h: u64,

    #[serde(deserialize_with = "null_as_default")]
    pub trade_24h_change_percent: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub buy_24h: u64,

    #[serde(deserialize_with = "null_as_default")]
    pub sell_24h: u64,

    /// Distinct wallets that traded in the last 24 hours
    #[serde(deserialize_with = "null_as_default")]
    pub unique_wallet_24h: u64,

    #[serde(deserialize_with = "null_as_default")]
    pub unique_wallet_24h_change_percent: Decimal,

    /// Unix seconds of the most recent trade
    #[serde(deserialize_with = "null_as_default")]
    pub last_trade_unix_time: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub last_trade_human_time: String,

    /// Social and listing links, when the token has any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<TokenExtensions>,
}

/// Optional project links attached to a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenExtensions {
    /// CoinGecko listing id
    #[serde(deserialize_with = "null_as_default")]
    pub coingecko: String,
    #[serde(deserialize_with = "null_as_default")]
    pub twitter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub telegram: String,
    #[serde(deserialize_with = "null_as_default")]
    pub discord: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl Client {
    /// Fetch market overview data for a token
    pub async fn get_token_overview(
        &self,
        cancel: &CancellationToken,
        address: &str,
    ) -> Result<TokenOverview> {
        require_address(TOKEN_OVERVIEW_PATH, address)?;

        let overview: TokenOverview = self
            .get_json(cancel, TOKEN_OVERVIEW_PATH, &[("address", address)])
            .await?;

        self.logger().debug(
            "fetched token overview",
            &[
                ("address", &address),
                ("symbol", &overview.symbol),
                ("name", &overview.name),
                ("liquidity", &overview.liquidity),
                ("volume_24h", &overview.volume_24h_usd),
                ("holders", &overview.holder),
            ],
        );

        Ok(overview)
    }
}
