/*
[INPUT]:  Network selection
[OUTPUT]: Chain ids and service endpoints for that network
[POS]:    Configuration layer - per-network defaults
[UPDATE]: When endpoints move or a network is added
*/

use serde::{Deserialize, Serialize};

use crate::types::Network;

const TOKEN_REGISTRY_URL: &str = "https://d36789lqgasyke.cloudfront.net";
const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// Chain ids and REST endpoints used by the services in this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkEndpoints {
    pub network: Network,
    pub chain_id: String,
    pub ethereum_chain_id: u64,
    pub cache_api: String,
    pub token_registry: String,
    pub coingecko: String,
}

impl NetworkEndpoints {
    pub fn for_network(network: Network) -> Self {
        let (chain_id, ethereum_chain_id, cache_api) = match network {
            Network::Mainnet => (
                "injective-1",
                1,
                "https://k8s.mainnet.ui-cache.injective.network",
            ),
            Network::Testnet => (
                "injective-888",
                11155111,
                "https://k8s.testnet.ui-cache.injective.network",
            ),
            Network::Devnet => (
                "injective-777",
                11155111,
                "https://devnet.ui-cache.injective.dev",
            ),
            Network::Local => ("injective-1", 1337, "http://localhost:4444"),
        };

        Self {
            network,
            chain_id: chain_id.to_string(),
            ethereum_chain_id,
            cache_api: cache_api.to_string(),
            token_registry: TOKEN_REGISTRY_URL.to_string(),
            coingecko: COINGECKO_URL.to_string(),
        }
    }
}

impl Default for NetworkEndpoints {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}
