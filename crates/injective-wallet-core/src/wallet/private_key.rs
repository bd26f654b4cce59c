/*
[INPUT]:  Hex private key and Ethereum chain id
[OUTPUT]: WalletStrategy backed by a key held in memory
[POS]:    Wallet layer - strategy for the private-key wallet (scripts, bots, tests)
[UPDATE]: When confirmation message format changes
*/

use async_trait::async_trait;
use tracing::debug;

use crate::http::{Result, WalletError};
use crate::types::Wallet;
use crate::wallet::{EthSecp256k1Key, WalletStrategy};

/// Strategy for `Wallet::PrivateKey`: addresses and confirmations come from a local key
#[derive(Debug, Clone)]
pub struct PrivateKeyStrategy {
    key: EthSecp256k1Key,
    ethereum_chain_id: u64,
}

impl PrivateKeyStrategy {
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str, ethereum_chain_id: u64) -> Result<Self> {
        Ok(Self {
            key: EthSecp256k1Key::from_private_key_hex(private_key_hex)?,
            ethereum_chain_id,
        })
    }

    pub fn key(&self) -> &EthSecp256k1Key {
        &self.key
    }
}

fn confirmation_message(address: &str) -> String {
    format!("Confirm wallet ownership of {address}")
}

#[async_trait]
impl WalletStrategy for PrivateKeyStrategy {
    async fn set_wallet(&self, wallet: Wallet) -> Result<()> {
        if wallet != Wallet::PrivateKey {
            return Err(WalletError::Strategy(format!(
                "private key strategy cannot drive {wallet}"
            )));
        }
        Ok(())
    }

    async fn enable_and_get_addresses(&self) -> Result<Vec<String>> {
        Ok(vec![self.key.ethereum_address().to_string()])
    }

    async fn get_addresses(&self) -> Result<Vec<String>> {
        self.enable_and_get_addresses().await
    }

    async fn get_session_or_confirm(&self, address: &str) -> Result<String> {
        if !address.eq_ignore_ascii_case(self.key.ethereum_address()) {
            return Err(WalletError::WrongAddress {
                address: address.to_string(),
            });
        }
        debug!(address, "signing address confirmation");
        self.key
            .sign_message(confirmation_message(self.key.ethereum_address()).as_bytes())
            .await
    }

    async fn get_ethereum_chain_id(&self) -> Result<u64> {
        Ok(self.ethereum_chain_id)
    }

    async fn is_wallet_installed(&self, wallet: Wallet) -> bool {
        wallet == Wallet::PrivateKey
    }

    async fn disconnect(&self) -> Result<()> {
        Ok(())
    }
}
