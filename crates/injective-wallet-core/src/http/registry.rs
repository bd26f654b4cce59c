/*
[INPUT]:  Network name and denoms
[OUTPUT]: Token metadata from the static JSON registry
[POS]:    HTTP layer - fallback token source, loaded once per process
[UPDATE]: When the registry file layout changes
*/

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tokio::sync::OnceCell;
use tracing::info;

use crate::http::{RestClient, Result};
use crate::token::TokenFetcher;
use crate::types::{Network, TokenStatic};

/// Token lookups against `{registry}/json/tokens/{network}.json`
#[derive(Debug, Clone)]
pub struct RegistryTokenFetcher {
    client: RestClient,
    network: Network,
    index: Arc<OnceCell<HashMap<String, TokenStatic>>>,
}

impl RegistryTokenFetcher {
    pub fn new(client: RestClient, network: Network) -> Self {
        Self {
            client,
            network,
            index: Arc::new(OnceCell::new()),
        }
    }

    async fn index(&self) -> Result<&HashMap<String, TokenStatic>> {
        self.index
            .get_or_try_init(|| async {
                let endpoint = format!("/json/tokens/{}.json", self.network);
                let builder = self.client.request(Method::GET, &endpoint)?;
                let tokens: Vec<TokenStatic> = self.client.send_json(builder).await?;
                info!(network = %self.network, count = tokens.len(), "token registry loaded");
                Ok(tokens
                    .into_iter()
                    .map(|token| (token.denom.clone(), token))
                    .collect())
            })
            .await
    }
}

#[async_trait]
impl TokenFetcher for RegistryTokenFetcher {
    fn name(&self) -> &'static str {
        "registry"
    }

    async fn fetch_token(&self, denom: &str) -> Result<Option<TokenStatic>> {
        Ok(self.index().await?.get(denom).cloned())
    }
}
