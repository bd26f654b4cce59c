/*
[INPUT]:  Denoms
[OUTPUT]: Token metadata from the UI cache service
[POS]:    HTTP layer - primary token source
[UPDATE]: When the cache service token endpoint changes
*/

use async_trait::async_trait;

use crate::http::{RestClient, Result};
use crate::token::TokenFetcher;
use crate::types::TokenStatic;

const DEFAULT_RETRIES: u32 = 1;

/// Token lookups against the UI cache microservice
#[derive(Debug, Clone)]
pub struct CacheApiTokenFetcher {
    client: RestClient,
    retries: u32,
}

impl CacheApiTokenFetcher {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            retries: DEFAULT_RETRIES,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

#[async_trait]
impl TokenFetcher for CacheApiTokenFetcher {
    fn name(&self) -> &'static str {
        "cache-api"
    }

    /// GET /v1/tokens?denom={denom}
    async fn fetch_token(&self, denom: &str) -> Result<Option<TokenStatic>> {
        self.client
            .get_json_with_retry("/v1/tokens", &[("denom", denom)], self.retries)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_token_encodes_ibc_denom() {
        let server = MockServer::start().await;
        let denom = "ibc/C4CFF46FD6DE35CA4CF4CE031E643C8FDC9BA4B99AE598E9B0ED98FE3A2319F9";

        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .and(query_param("denom", denom))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "denom": denom,
                "name": "Cosmos Hub",
                "symbol": "ATOM",
                "decimals": 6,
                "tokenType": "ibc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = CacheApiTokenFetcher::new(RestClient::new(&server.uri()).unwrap());
        let token = fetcher.fetch_token(denom).await.unwrap().unwrap();

        assert_eq!(token.symbol, "ATOM");
        assert_eq!(token.decimals, 6);
    }
}
