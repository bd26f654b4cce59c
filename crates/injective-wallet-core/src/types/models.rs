/*
[INPUT]:  Token registry / cache service JSON and serde requirements
[OUTPUT]: Typed token metadata structs
[POS]:    Data layer - token metadata shared by the token service and CLI
[UPDATE]: When registry schema changes
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TokenType;

const UNKNOWN_TOKEN_LOGO: &str = "unknown.png";

/// Static token metadata as served by the token registry and cache service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStatic {
    pub denom: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
    /// ERC20 / CW20 contract address when the token has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl TokenStatic {
    /// Placeholder for a denom nobody knows about
    pub fn unknown(denom: &str) -> Self {
        Self {
            denom: denom.to_string(),
            name: denom.to_string(),
            symbol: denom.to_string(),
            decimals: 0,
            logo: UNKNOWN_TOKEN_LOGO.to_string(),
            token_type: TokenType::Unknown,
            coin_gecko_id: None,
            address: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.token_type == TokenType::Unknown && self.logo == UNKNOWN_TOKEN_LOGO
    }
}

/// USD price for a CoinGecko id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub coin_gecko_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub usd: Decimal,
}
