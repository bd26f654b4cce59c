/*
[INPUT]:  Optional hex-encoded secp256k1 private key
[OUTPUT]: In-memory key with Ethereum/Injective addresses and message signatures
[POS]:    Wallet layer - key material for auto-sign sessions and the private-key wallet
[UPDATE]: When changing key format or address derivation
*/

use std::fmt;
use std::str::FromStr;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;

use crate::http::{Result, WalletError};
use crate::wallet::address::get_injective_address;

/// eth_secp256k1 key held in process memory
#[derive(Clone)]
pub struct EthSecp256k1Key {
    signer: PrivateKeySigner,
    ethereum_address: String,
    injective_address: String,
}

impl EthSecp256k1Key {
    /// Generate a new random keypair
    pub fn generate() -> Result<Self> {
        Self::from_signer(PrivateKeySigner::random())
    }

    /// Create from a hex private key, with or without `0x`
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self> {
        let trimmed = private_key_hex.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let signer = PrivateKeySigner::from_str(trimmed)
            .map_err(|e| WalletError::Key(format!("Invalid private key: {e}")))?;
        Self::from_signer(signer)
    }

    fn from_signer(signer: PrivateKeySigner) -> Result<Self> {
        let ethereum_address = format!("0x{}", hex::encode(signer.address().as_slice()));
        let injective_address = get_injective_address(&ethereum_address)?;
        Ok(Self {
            signer,
            ethereum_address,
            injective_address,
        })
    }

    /// Lowercase `0x` address
    pub fn ethereum_address(&self) -> &str {
        &self.ethereum_address
    }

    pub fn injective_address(&self) -> &str {
        &self.injective_address
    }

    /// 64 hex chars, no prefix
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.signer.to_bytes().as_slice())
    }

    /// EIP-191 personal signature, `0x` + 65 bytes hex
    pub async fn sign_message(&self, message: &[u8]) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|e| WalletError::Key(format!("Failed to sign message: {e}")))?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

impl fmt::Debug for EthSecp256k1Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthSecp256k1Key")
            .field("injective_address", &self.injective_address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_known_key_addresses() {
        let key = EthSecp256k1Key::from_private_key_hex(PK).unwrap();
        assert_eq!(
            key.ethereum_address(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(
            key.injective_address(),
            "inj17w0adeg64ky0daxwd2ugyuneellmjgnxf5vkec"
        );
    }

    #[test]
    fn test_private_key_hex_round_trips() {
        let key = EthSecp256k1Key::generate().unwrap();
        let restored = EthSecp256k1Key::from_private_key_hex(&key.private_key_hex()).unwrap();
        assert_eq!(key.private_key_hex().len(), 64);
        assert_eq!(restored.injective_address(), key.injective_address());
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = EthSecp256k1Key::generate().unwrap();
        let b = EthSecp256k1Key::generate().unwrap();
        assert_ne!(a.injective_address(), b.injective_address());
    }

    #[test]
    fn test_invalid_private_key() {
        let err = EthSecp256k1Key::from_private_key_hex("0xdeadbeef").unwrap_err();
        assert!(matches!(err, WalletError::Key(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = EthSecp256k1Key::from_private_key_hex(PK).unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("ac0974bec39a17e3"));
    }

    #[tokio::test]
    async fn test_sign_message_shape() {
        let key = EthSecp256k1Key::from_private_key_hex(PK).unwrap();
        let signature = key.sign_message(b"hello").await.unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132);
    }
}
