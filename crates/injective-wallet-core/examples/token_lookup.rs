/*
[INPUT]:  Denoms and CoinGecko ids
[OUTPUT]: Token metadata and USD prices printed to the console
[POS]:    Examples - token and price service demonstration
[UPDATE]: When token sources change
*/

use std::sync::Arc;

use injective_wallet_core::http::{CacheApiTokenFetcher, RegistryTokenFetcher};
use injective_wallet_core::*;

/// Example: Token lookup against mainnet services
#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Injective Token Lookup Example ===\n");

    let endpoints = NetworkEndpoints::for_network(Network::Mainnet);
    let tokens = TokenService::new(Arc::new(CacheApiTokenFetcher::new(RestClient::new(
        &endpoints.cache_api,
    )?)))
    .with_fallback(Arc::new(RegistryTokenFetcher::new(
        RestClient::new(&endpoints.token_registry)?,
        endpoints.network,
    )));
    let prices = PriceService::new(RestClient::new(&endpoints.coingecko)?);

    for denom in ["inj", "peggy0xdAC17F958D2ee523a2206206994597C13D831ec7"] {
        match tokens.query_token(denom).await {
            Ok(token) => {
                let usd = match &token.coin_gecko_id {
                    Some(id) => prices.get_usd_price(id).await.to_string(),
                    None => "-".to_string(),
                };
                println!("✓ {} ({} decimals) ${}", token.symbol, token.decimals, usd);
            }
            Err(e) => eprintln!("✗ {denom}: {e}"),
        }
    }

    Ok(())
}
