/*
[INPUT]:  Routed messages and the signer that should sign them
[OUTPUT]: Transaction responses from the broadcaster capability
[POS]:    Broadcast layer - capability interface over the chain broadcaster
[UPDATE]: When broadcast modes or request fields change
*/

use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::http::{Result, WalletError};
use crate::types::{Msg, TxResponse};

/// Everything a broadcaster needs to sign and submit one transaction
#[derive(Clone, PartialEq)]
pub struct BroadcastRequest {
    pub msgs: Vec<Msg>,
    pub injective_address: String,
    pub ethereum_address: Option<String>,
    pub memo: Option<String>,
    /// Set when an ephemeral auto-sign key signs instead of the wallet
    pub private_key_hex: Option<String>,
}

impl BroadcastRequest {
    pub fn new(msgs: Vec<Msg>, injective_address: impl Into<String>) -> Self {
        Self {
            msgs,
            injective_address: injective_address.into(),
            ethereum_address: None,
            memo: None,
            private_key_hex: None,
        }
    }

    pub fn with_memo(mut self, memo: Option<String>) -> Self {
        self.memo = memo;
        self
    }

    pub fn is_ephemeral(&self) -> bool {
        self.private_key_hex.is_some()
    }
}

impl fmt::Debug for BroadcastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastRequest")
            .field("msgs", &self.msgs)
            .field("injective_address", &self.injective_address)
            .field("ethereum_address", &self.ethereum_address)
            .field("memo", &self.memo)
            .field(
                "private_key_hex",
                &self.private_key_hex.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Capability interface over the chain message broadcaster
#[async_trait]
pub trait MsgBroadcaster: Send + Sync {
    async fn broadcast(&self, request: BroadcastRequest) -> Result<TxResponse>;

    /// Broadcast through the newer signing flow (EIP-712 v2 for EVM wallets)
    async fn broadcast_v2(&self, request: BroadcastRequest) -> Result<TxResponse>;

    /// Broadcast with gas paid by the fee delegation service
    async fn broadcast_with_fee_delegation(&self, request: BroadcastRequest) -> Result<TxResponse>;
}

/// Which broadcaster method received a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastMode {
    Standard,
    V2,
    FeeDelegation,
}

/// Mock broadcaster for testing: records requests and answers with fixed hashes
#[derive(Debug, Default)]
pub struct MockBroadcaster {
    fail_with: Option<String>,
    requests: Mutex<Vec<(BroadcastMode, BroadcastRequest)>>,
}

impl MockBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `WalletError::Broadcast(message)`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(BroadcastMode, BroadcastRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<(BroadcastMode, BroadcastRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn submit(&self, mode: BroadcastMode, request: BroadcastRequest) -> Result<TxResponse> {
        let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        requests.push((mode, request));

        if let Some(message) = &self.fail_with {
            return Err(WalletError::Broadcast(message.clone()));
        }

        Ok(TxResponse {
            tx_hash: format!("{:064X}", requests.len()),
            height: 1_000 + requests.len() as u64,
            ..TxResponse::default()
        })
    }
}

#[async_trait]
impl MsgBroadcaster for MockBroadcaster {
    async fn broadcast(&self, request: BroadcastRequest) -> Result<TxResponse> {
        self.submit(BroadcastMode::Standard, request)
    }

    async fn broadcast_v2(&self, request: BroadcastRequest) -> Result<TxResponse> {
        self.submit(BroadcastMode::V2, request)
    }

    async fn broadcast_with_fee_delegation(&self, request: BroadcastRequest) -> Result<TxResponse> {
        self.submit(BroadcastMode::FeeDelegation, request)
    }
}
