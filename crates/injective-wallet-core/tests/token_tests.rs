/*
[INPUT]:  Mock cache service, token registry and CoinGecko responses
[OUTPUT]: Test results for token resolution and price lookups
[POS]:    Integration tests - token and price services
[UPDATE]: When token sources or price fallback rules change
*/

mod common;

use std::sync::Arc;

use common::setup_mock_server;
use injective_wallet_core::http::{CacheApiTokenFetcher, RegistryTokenFetcher};
use injective_wallet_core::{Network, PriceService, RestClient, TokenService, TokenType};
use rust_decimal::Decimal;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const USDT: &str = "peggy0xdAC17F958D2ee523a2206206994597C13D831ec7";

fn token_service(uri: &str) -> TokenService {
    let client = assert_ok!(RestClient::new(uri));
    TokenService::new(Arc::new(CacheApiTokenFetcher::new(client.clone()).with_retries(0)))
        .with_fallback(Arc::new(RegistryTokenFetcher::new(client, Network::Mainnet)))
}

#[tokio::test]
async fn test_query_token_is_cache_populating() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/tokens"))
        .and(query_param("denom", USDT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "denom": USDT,
            "name": "Tether",
            "symbol": "USDT",
            "decimals": 6,
            "tokenType": "erc20",
            "coinGeckoId": "tether"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = token_service(&server.uri());
    let first = assert_ok!(service.query_token(USDT).await);
    let second = assert_ok!(service.query_token(USDT).await);

    assert_eq!(first, second);
    assert_eq!(first.token_type, TokenType::Erc20);
    assert_eq!(service.cached_token(USDT).await, Some(first));
}

#[tokio::test]
async fn test_registry_fallback_and_unknown_placeholder() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/tokens"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json/tokens/mainnet.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"denom": "inj", "name": "Injective", "symbol": "INJ", "decimals": 18, "tokenType": "native", "coinGeckoId": "injective-protocol"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = token_service(&server.uri());
    let tokens = assert_ok!(service.query_tokens(&["inj", "factory/inj1xyz/unknown"]).await);

    assert_eq!(tokens[0].symbol, "INJ");
    assert!(tokens[1].is_unknown());
    assert_eq!(tokens[1].symbol, "factory/inj1xyz/unknown");
    assert_eq!(service.cached_len().await, 2);

    service.clear_cache().await;
    assert_eq!(service.cached_len().await, 0);
}

#[tokio::test]
async fn test_price_failure_yields_zero() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let prices = PriceService::new(assert_ok!(RestClient::new(&server.uri())));
    let result = prices.get_usd_prices(&["injective-protocol", "tether"]).await;

    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|price| price.usd == Decimal::ZERO));
    assert_eq!(prices.get_usd_price("tether").await, Decimal::ZERO);
}
