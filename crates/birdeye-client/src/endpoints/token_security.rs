//! Token security checks

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{null_as_default, require_address};
use crate::client::Client;
use crate::error::Result;

const TOKEN_SECURITY_PATH: &str = "/defi/token_security";

/// Security-relevant facts about a token's mint and holders.
///
/// Balances and percentages are passed through as the API's decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenSecurity {
    /// Address allowed to mint new tokens, if any
    pub mint_authority: Option<String>,

    /// Address allowed to freeze token accounts, if any
    pub freeze_authority: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub creator_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creator_balance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creator_percentage: String,

    #[serde(deserialize_with = "null_as_default")]
    pub owner_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_balance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_percentage: String,

    /// Combined balance of the ten largest holders
    #[serde(deserialize_with = "null_as_default")]
    pub top10_holder_balance: String,
    /// Share of supply held by the ten largest holders
    #[serde(deserialize_with = "null_as_default")]
    pub top10_holder_percent: String,
    /// Combined balance of the ten largest non-program holders
    #[serde(deserialize_with = "null_as_default")]
    pub top10_user_balance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub top10_user_percent: String,

    #[serde(deserialize_with = "null_as_default")]
    pub total_supply: String,

    /// Minted by the Token-2022 program
    #[serde(deserialize_with = "null_as_default")]
    pub is_token2022: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub transfer_fee_enable: bool,

    /// Token-2022 transfer fee settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_fee_data: Option<TransferFeeData>,

    /// Soulbound token
    #[serde(deserialize_with = "null_as_default")]
    pub non_transferable: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub mutable_metadata: bool,
}

/// Token-2022 transfer fee configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferFeeData {
    /// Fee in basis points (100 = 1%)
    #[serde(deserialize_with = "null_as_default")]
    pub transfer_fee_bps: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub max_fee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fee_authority: String,
    #[serde(deserialize_with = "null_as_default")]
    pub withdraw_authority: String,
}

fn is_set(authority: Option<&str>) -> bool {
    authority.is_some_and(|a| !a.is_empty())
}

impl TokenSecurity {
    /// True if new tokens can still be minted
    pub fn has_mint_authority(&self) -> bool {
        is_set(self.mint_authority.as_deref())
    }

    /// True if holder accounts can be frozen
    pub fn has_freeze_authority(&self) -> bool {
        is_set(self.freeze_authority.as_deref())
    }
}

impl Client {
    /// Fetch security information for a token
    pub async fn get_token_security(
        &self,
        cancel: &CancellationToken,
        address: &str,
    ) -> Result<TokenSecurity> {
        require_address(TOKEN_SECURITY_PATH, address)?;

        let security: TokenSecurity = self
            .get_json(cancel, TOKEN_SECURITY_PATH, &[("address", address)])
            .await?;

        self.logger().debug(
            "fetched token security",
            &[
                ("address", &address),
                ("has_mint_auth", &security.has_mint_authority()),
                ("has_freeze_auth", &security.has_freeze_authority()),
                ("creator_pct", &security.creator_percentage),
                ("top10_pct", &security.top10_holder_percent),
            ],
        );

        Ok(security)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::envelope::parse_response;
    use pretty_assertions::assert_eq;

    fn with_authorities(mint: Option<&str>, freeze: Option<&str>) -> TokenSecurity {
        TokenSecurity {
            mint_authority: mint.map(str::to_string),
            freeze_authority: freeze.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_authority_predicates() {
        let cases = [
            (None, false),
            (Some(""), false),
            (Some("MintAuth123"), true),
        ];
        for (authority, expected) in cases {
            assert_eq!(
                with_authorities(authority, None).has_mint_authority(),
                expected,
                "mint authority {authority:?}"
            );
            assert_eq!(
                with_authorities(None, authority).has_freeze_authority(),
                expected,
                "freeze authority {authority:?}"
            );
        }
    }

    #[test]
    fn test_security_wire_names() {
        let body = br#"{"success":true,"data":{
            "mintAuthority":"MintAuth123","freezeAuthority":null,
            "creatorAddress":"CreatorAddr","creatorPercentage":"5.5",
            "top10HolderPercent":"25.0","totalSupply":"20000000",
            "isToken2022":true,"transferFeeEnable":true,"mutableMetadata":true,
            "transferFeeData":{"transferFeeBps":100,"maxFee":"5000","feeAuthority":"FeeAuth"}
        }}"#;

        let security: TokenSecurity = parse_response(body).expect("Operation should succeed");
        assert!(security.has_mint_authority());
        assert!(!security.has_freeze_authority());
        assert_eq!(security.creator_address, "CreatorAddr");
        assert_eq!(security.creator_percentage, "5.5");
        assert_eq!(security.top10_holder_percent, "25.0");
        assert!(security.is_token2022);
        assert!(security.mutable_metadata);
        assert!(!security.non_transferable);

        let fee = security.transfer_fee_data.expect("fee data present");
        assert_eq!(fee.transfer_fee_bps, 100);
        assert_eq!(fee.max_fee, "5000");
        assert_eq!(fee.fee_authority, "FeeAuth");
        assert_eq!(fee.withdraw_authority, "");
    }
}
