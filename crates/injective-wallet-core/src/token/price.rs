/*
[INPUT]:  CoinGecko ids
[OUTPUT]: USD prices (zero when unavailable)
[POS]:    Token layer - price feed with silent zero fallback
[UPDATE]: When price sources or fallback rules change
*/

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::http::{RestClient, Result};
use crate::types::TokenPrice;

/// USD price lookups against the CoinGecko `simple/price` endpoint
#[derive(Debug, Clone)]
pub struct PriceService {
    client: RestClient,
    last_known: Arc<RwLock<HashMap<String, Decimal>>>,
}

impl PriceService {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            last_known: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch prices for the given ids.
    ///
    /// Never fails: on a network or decoding error the last known price is
    /// used, and ids never priced before come back as zero.
    pub async fn get_usd_prices(&self, coin_gecko_ids: &[&str]) -> Vec<TokenPrice> {
        let ids: Vec<&str> = coin_gecko_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            return Vec::new();
        }

        match self.fetch(&ids).await {
            Ok(prices) => {
                let mut guard = self.last_known.write().await;
                guard.extend(prices);
            }
            Err(err) => {
                warn!(error = %err, ids = ?ids, "price lookup failed, using last known prices");
            }
        }

        let guard = self.last_known.read().await;
        ids.iter()
            .map(|id| TokenPrice {
                coin_gecko_id: id.to_string(),
                usd: guard.get(*id).copied().unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    pub async fn get_usd_price(&self, coin_gecko_id: &str) -> Decimal {
        self.get_usd_prices(&[coin_gecko_id])
            .await
            .into_iter()
            .next()
            .map(|price| price.usd)
            .unwrap_or(Decimal::ZERO)
    }

    /// GET /simple/price?ids={ids}&vs_currencies=usd
    async fn fetch(&self, ids: &[&str]) -> Result<HashMap<String, Decimal>> {
        let joined = ids.join(",");
        let builder = self
            .client
            .request(Method::GET, "/simple/price")?
            .query(&[("ids", joined.as_str()), ("vs_currencies", "usd")]);
        let body: HashMap<String, HashMap<String, f64>> = self.client.send_json(builder).await?;

        let prices = body
            .into_iter()
            .filter_map(|(id, quotes)| {
                let usd = quotes.get("usd").copied().and_then(Decimal::from_f64)?;
                Some((id, usd))
            })
            .collect::<HashMap<_, _>>();
        debug!(requested = ids.len(), priced = prices.len(), "prices fetched");
        Ok(prices)
    }
}
