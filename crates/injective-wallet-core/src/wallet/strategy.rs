/*
[INPUT]:  Wallet kind selection and address confirmation requests
[OUTPUT]: Enabled addresses, session tokens and chain ids from the wallet
[POS]:    Wallet layer - capability interface over browser/hardware wallet adapters
[UPDATE]: When adding strategy capabilities
*/

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::http::{Result, WalletError};
use crate::types::Wallet;

/// Capability interface over the wallet provider adapters.
///
/// Implementations wrap whatever drives the actual wallet (extension bridge,
/// hardware transport, local key). The session only sequences these calls.
#[async_trait]
pub trait WalletStrategy: Send + Sync {
    /// Select which wallet subsequent calls talk to
    async fn set_wallet(&self, wallet: Wallet) -> Result<()>;

    /// Ask the wallet to enable this app and return its addresses
    async fn enable_and_get_addresses(&self) -> Result<Vec<String>>;

    /// List addresses without enabling (hardware wallet derivation paths)
    async fn get_addresses(&self) -> Result<Vec<String>>;

    /// Return an existing session token or ask the user to confirm the address
    async fn get_session_or_confirm(&self, address: &str) -> Result<String>;

    /// Ethereum chain id the wallet is currently on
    async fn get_ethereum_chain_id(&self) -> Result<u64>;

    /// Whether the browser extension for `wallet` is present
    async fn is_wallet_installed(&self, wallet: Wallet) -> bool;

    /// Drop any provider-side session
    async fn disconnect(&self) -> Result<()>;
}

/// Mock wallet strategy for testing
#[derive(Debug)]
pub struct MockWalletStrategy {
    addresses: Vec<String>,
    hw_addresses: Vec<String>,
    session: String,
    ethereum_chain_id: u64,
    installed: BTreeSet<Wallet>,
    reject_enable: bool,
    active_wallet: Mutex<Option<Wallet>>,
    calls: Mutex<Vec<String>>,
}

impl MockWalletStrategy {
    /// Create a mock that enables `addresses` and answers with `session`
    pub fn new(addresses: Vec<String>, session: &str) -> Self {
        Self {
            addresses,
            hw_addresses: Vec::new(),
            session: session.to_string(),
            ethereum_chain_id: 1,
            installed: Wallet::EXTENSIONS.into_iter().collect(),
            reject_enable: false,
            active_wallet: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_ethereum_chain_id(mut self, chain_id: u64) -> Self {
        self.ethereum_chain_id = chain_id;
        self
    }

    pub fn with_hardware_addresses(mut self, addresses: Vec<String>) -> Self {
        self.hw_addresses = addresses;
        self
    }

    pub fn with_installed(mut self, wallets: &[Wallet]) -> Self {
        self.installed = wallets.iter().copied().collect();
        self
    }

    /// Make `enable_and_get_addresses` fail as if the user rejected the request
    pub fn rejecting(mut self) -> Self {
        self.reject_enable = true;
        self
    }

    /// Names of the strategy methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn active_wallet(&self) -> Option<Wallet> {
        *self
            .active_wallet
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.to_string());
    }
}

#[async_trait]
impl WalletStrategy for MockWalletStrategy {
    async fn set_wallet(&self, wallet: Wallet) -> Result<()> {
        self.record("set_wallet");
        *self
            .active_wallet
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(wallet);
        Ok(())
    }

    async fn enable_and_get_addresses(&self) -> Result<Vec<String>> {
        self.record("enable_and_get_addresses");
        if self.reject_enable {
            return Err(WalletError::Strategy("user rejected the request".to_string()));
        }
        Ok(self.addresses.clone())
    }

    async fn get_addresses(&self) -> Result<Vec<String>> {
        self.record("get_addresses");
        Ok(self.hw_addresses.clone())
    }

    async fn get_session_or_confirm(&self, _address: &str) -> Result<String> {
        self.record("get_session_or_confirm");
        Ok(self.session.clone())
    }

    async fn get_ethereum_chain_id(&self) -> Result<u64> {
        self.record("get_ethereum_chain_id");
        Ok(self.ethereum_chain_id)
    }

    async fn is_wallet_installed(&self, wallet: Wallet) -> bool {
        self.installed.contains(&wallet)
    }

    async fn disconnect(&self) -> Result<()> {
        self.record("disconnect");
        *self
            .active_wallet
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
