/*
[INPUT]:  Denoms and token fetchers (cache service, static registry)
[OUTPUT]: Token metadata, cached per denom
[POS]:    Token layer - cache-populating denom resolution with fallback
[UPDATE]: When adding token sources or changing fallback order
*/

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::http::Result;
use crate::types::TokenStatic;

/// A source of token metadata
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look a denom up. `Ok(None)` means the source does not know it.
    async fn fetch_token(&self, denom: &str) -> Result<Option<TokenStatic>>;
}

/// Resolves denoms to token metadata and remembers the answers
#[derive(Clone)]
pub struct TokenService {
    primary: Arc<dyn TokenFetcher>,
    fallback: Option<Arc<dyn TokenFetcher>>,
    cache: Arc<RwLock<HashMap<String, TokenStatic>>>,
}

impl TokenService {
    pub fn new(primary: Arc<dyn TokenFetcher>) -> Self {
        Self {
            primary,
            fallback: None,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn TokenFetcher>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Resolve a denom.
    ///
    /// Cached denoms never hit the network again. Otherwise the primary source
    /// is asked first; an error or a miss falls through to the fallback. A denom
    /// neither source knows resolves to `TokenStatic::unknown` and is cached too.
    /// When every source errors the last error is returned and nothing is cached.
    pub async fn query_token(&self, denom: &str) -> Result<TokenStatic> {
        let denom = denom.trim();
        if let Some(token) = self.cached_token(denom).await {
            debug!(denom, "token cache hit");
            return Ok(token);
        }

        let mut last_error = None;
        let mut sources = vec![self.primary.clone()];
        sources.extend(self.fallback.clone());

        for source in sources {
            match source.fetch_token(denom).await {
                Ok(Some(token)) => {
                    debug!(denom, source = source.name(), "token resolved");
                    return Ok(self.remember(denom, token).await);
                }
                Ok(None) => {
                    debug!(denom, source = source.name(), "token not found");
                    last_error = None;
                }
                Err(err) => {
                    warn!(denom, source = source.name(), error = %err, "token lookup failed");
                    last_error = Some(err);
                }
            }
        }

        if let Some(err) = last_error {
            return Err(err);
        }

        Ok(self.remember(denom, TokenStatic::unknown(denom)).await)
    }

    /// Resolve several denoms, preserving order
    pub async fn query_tokens(&self, denoms: &[&str]) -> Result<Vec<TokenStatic>> {
        let mut tokens = Vec::with_capacity(denoms.len());
        for denom in denoms {
            tokens.push(self.query_token(denom).await?);
        }
        Ok(tokens)
    }

    pub async fn cached_token(&self, denom: &str) -> Option<TokenStatic> {
        self.cache.read().await.get(denom.trim()).cloned()
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    async fn remember(&self, denom: &str, token: TokenStatic) -> TokenStatic {
        let mut guard = self.cache.write().await;
        guard.entry(denom.to_string()).or_insert(token).clone()
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.as_ref().map(|source| source.name()))
            .finish()
    }
}
