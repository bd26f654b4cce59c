/*
[INPUT]:  Parsed CLI arguments and loaded configuration
[OUTPUT]: Serializable command results
[POS]:    Command layer - thin wrappers over injective-wallet-core
[UPDATE]: When adding or changing subcommands
*/

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use injective_wallet_core::authz::{ContractExecutionCompatGrant, build_auto_sign_grants};
use injective_wallet_core::http::{CacheApiTokenFetcher, RegistryTokenFetcher};
use injective_wallet_core::wallet::{
    default_subaccount_id, get_ethereum_address, subaccount_id, to_injective_address,
};
use injective_wallet_core::{
    AutoSignSession, Msg, NetworkEndpoints, PriceService, RestClient, SessionStore, TokenPrice,
    TokenService, TokenStatic,
};

/// Cache service first, static registry as fallback
pub fn token_service(endpoints: &NetworkEndpoints) -> Result<TokenService> {
    let cache = RestClient::new(&endpoints.cache_api).context("cache api url")?;
    let registry = RestClient::new(&endpoints.token_registry).context("token registry url")?;
    Ok(TokenService::new(Arc::new(CacheApiTokenFetcher::new(cache)))
        .with_fallback(Arc::new(RegistryTokenFetcher::new(registry, endpoints.network))))
}

pub fn price_service(endpoints: &NetworkEndpoints) -> Result<PriceService> {
    let client = RestClient::new(&endpoints.coingecko).context("coingecko url")?;
    Ok(PriceService::new(client))
}

pub async fn resolve_tokens(service: &TokenService, denoms: &[String]) -> Result<Vec<TokenStatic>> {
    let denoms: Vec<&str> = denoms.iter().map(String::as_str).collect();
    service
        .query_tokens(&denoms)
        .await
        .context("resolve token metadata")
}

pub async fn usd_prices(service: &PriceService, ids: &[String]) -> Vec<TokenPrice> {
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    service.get_usd_prices(&ids).await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressInfo {
    pub injective_address: String,
    pub ethereum_address: String,
    pub default_subaccount_id: String,
}

/// Both address formats plus the default subaccount
pub fn address_info(address: &str) -> Result<AddressInfo> {
    let injective_address = to_injective_address(address)?;
    Ok(AddressInfo {
        ethereum_address: get_ethereum_address(&injective_address)?,
        default_subaccount_id: default_subaccount_id(&injective_address)?,
        injective_address,
    })
}

pub fn subaccount(address: &str, nonce: u32) -> Result<String> {
    Ok(subaccount_id(address, nonce)?)
}

/// Stored auto-sign session without its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub granter: String,
    pub grantee: String,
    pub expiration: DateTime<Utc>,
    pub expired: bool,
    pub duration_seconds: u64,
    pub message_types: Vec<String>,
    pub contracts: Vec<String>,
}

impl SessionSummary {
    pub fn new(session: &AutoSignSession, now: DateTime<Utc>) -> Self {
        Self {
            granter: session.granter.clone(),
            grantee: session.injective_address.clone(),
            expiration: session.expiration,
            expired: session.is_expired_at(now),
            duration_seconds: session.duration_seconds,
            message_types: session.message_types.clone(),
            contracts: session
                .contract_execution_compat
                .iter()
                .map(|grant| grant.contract.clone())
                .collect(),
        }
    }
}

pub fn list_sessions(store: &dyn SessionStore, now: DateTime<Utc>) -> Result<Vec<SessionSummary>> {
    let mut summaries = Vec::new();
    for granter in store.list_granters()? {
        if let Some(session) = store.load(&granter)? {
            summaries.push(SessionSummary::new(&session, now));
        }
    }
    Ok(summaries)
}

pub fn show_session(
    store: &dyn SessionStore,
    granter: &str,
    now: DateTime<Utc>,
) -> Result<SessionSummary> {
    let granter = to_injective_address(granter)?;
    let session = store
        .load(&granter)?
        .ok_or_else(|| anyhow!("no auto-sign session stored for {granter}"))?;
    Ok(SessionSummary::new(&session, now))
}

pub fn clear_session(store: &dyn SessionStore, granter: &str) -> Result<()> {
    let granter = to_injective_address(granter)?;
    store.remove(&granter)?;
    info!(granter = %granter, "auto-sign session cleared");
    Ok(())
}

/// Parse `<contract>:<max_calls>`
pub fn parse_contract_grant(raw: &str) -> Result<ContractExecutionCompatGrant> {
    let (contract, max_calls) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("expected <contract>:<max_calls>, got {raw}"))?;
    let contract = to_injective_address(contract)?;
    let max_calls = max_calls
        .parse::<u64>()
        .with_context(|| format!("invalid max calls in {raw}"))?;
    Ok(ContractExecutionCompatGrant {
        contract,
        max_calls,
    })
}

/// The MsgGrant batch an auto-sign connection would broadcast
pub fn plan_grants(
    granter: &str,
    grantee: &str,
    message_types: &[String],
    contracts: &[String],
    duration_seconds: u64,
    now: DateTime<Utc>,
) -> Result<Vec<Msg>> {
    let granter = to_injective_address(granter)?;
    let grantee = to_injective_address(grantee)?;
    let contract_grants = contracts
        .iter()
        .map(|raw| parse_contract_grant(raw))
        .collect::<Result<Vec<_>>>()?;

    let window = i64::try_from(duration_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| anyhow!("duration out of range: {duration_seconds}"))?;
    let expiration = now
        .checked_add_signed(window)
        .ok_or_else(|| anyhow!("duration out of range: {duration_seconds}"))?;

    Ok(build_auto_sign_grants(
        &granter,
        &grantee,
        message_types,
        &contract_grants,
        expiration,
    ))
}
