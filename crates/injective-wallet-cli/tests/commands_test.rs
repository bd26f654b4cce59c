/*
[INPUT]:  Mock cache service and CoinGecko responses
[OUTPUT]: Test results for token and price commands
[POS]:    Integration tests - command layer over HTTP services
[UPDATE]: When token or price commands change
*/

use std::str::FromStr;

use injective_wallet_cli::CliConfig;
use injective_wallet_cli::commands;
use injective_wallet_cli::config::EndpointOverrides;
use rust_decimal::Decimal;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> CliConfig {
    CliConfig {
        endpoints: EndpointOverrides {
            cache_api: Some(server.uri()),
            token_registry: Some(server.uri()),
            coingecko: Some(server.uri()),
        },
        ..CliConfig::default()
    }
}

#[tokio::test]
async fn test_token_command_resolves_denoms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tokens"))
        .and(query_param("denom", "inj"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "denom": "inj",
            "name": "Injective",
            "symbol": "INJ",
            "decimals": 18,
            "tokenType": "native"
        })))
        .mount(&server)
        .await;

    let service = assert_ok!(commands::token_service(&config_for(&server).endpoints()));
    let tokens = assert_ok!(commands::resolve_tokens(&service, &["inj".to_string()]).await);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].symbol, "INJ");
}

#[tokio::test]
async fn test_price_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "injective-protocol"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"injective-protocol": {"usd": 21.5}})),
        )
        .mount(&server)
        .await;

    let service = assert_ok!(commands::price_service(&config_for(&server).endpoints()));
    let prices = commands::usd_prices(&service, &["injective-protocol".to_string()]).await;
    assert_eq!(prices[0].usd, Decimal::from_str("21.5").unwrap());
}
