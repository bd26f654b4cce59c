/*
[INPUT]:  Wallet kinds, network names and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - shared enums for wallet, queue and token state
[UPDATE]: When a wallet integration or token class is added
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wallet integrations the session can drive through a `WalletStrategy`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Wallet {
    #[default]
    Metamask,
    Rabby,
    BitGet,
    Okx,
    Phantom,
    TrustWallet,
    Keplr,
    Leap,
    Ninji,
    Cosmostation,
    Ledger,
    LedgerLegacy,
    LedgerCosmos,
    Trezor,
    WalletConnect,
    Turnkey,
    Magic,
    PrivateKey,
}

impl Wallet {
    /// Wallets that hand out `0x` Ethereum addresses
    pub fn is_evm(self) -> bool {
        matches!(
            self,
            Wallet::Metamask
                | Wallet::Rabby
                | Wallet::BitGet
                | Wallet::Okx
                | Wallet::Phantom
                | Wallet::TrustWallet
                | Wallet::Ledger
                | Wallet::LedgerLegacy
                | Wallet::Trezor
                | Wallet::WalletConnect
                | Wallet::Turnkey
                | Wallet::Magic
                | Wallet::PrivateKey
        )
    }

    /// Wallets that hand out bech32 `inj` addresses
    pub fn is_cosmos(self) -> bool {
        !self.is_evm()
    }

    pub fn is_hardware(self) -> bool {
        matches!(
            self,
            Wallet::Ledger | Wallet::LedgerLegacy | Wallet::LedgerCosmos | Wallet::Trezor
        )
    }

    /// Wallets delivered as a browser extension that must be detected first
    pub fn requires_extension(self) -> bool {
        Self::EXTENSIONS.contains(&self)
    }

    pub const EXTENSIONS: [Wallet; 10] = [
        Wallet::Metamask,
        Wallet::Rabby,
        Wallet::BitGet,
        Wallet::Okx,
        Wallet::Phantom,
        Wallet::TrustWallet,
        Wallet::Keplr,
        Wallet::Leap,
        Wallet::Ninji,
        Wallet::Cosmostation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Wallet::Metamask => "metamask",
            Wallet::Rabby => "rabby",
            Wallet::BitGet => "bit-get",
            Wallet::Okx => "okx",
            Wallet::Phantom => "phantom",
            Wallet::TrustWallet => "trust-wallet",
            Wallet::Keplr => "keplr",
            Wallet::Leap => "leap",
            Wallet::Ninji => "ninji",
            Wallet::Cosmostation => "cosmostation",
            Wallet::Ledger => "ledger",
            Wallet::LedgerLegacy => "ledger-legacy",
            Wallet::LedgerCosmos => "ledger-cosmos",
            Wallet::Trezor => "trezor",
            Wallet::WalletConnect => "wallet-connect",
            Wallet::Turnkey => "turnkey",
            Wallet::Magic => "magic",
            Wallet::PrivateKey => "private-key",
        }
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the wallet connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletConnectStatus {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
}

/// Pending transaction guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
    Local,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "local" => Ok(Network::Local),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Native,
    Ibc,
    Erc20,
    TokenFactory,
    Cw20,
    InsuranceFund,
    #[default]
    Unknown,
}

impl TokenType {
    /// Classify a denom by its prefix
    pub fn from_denom(denom: &str) -> Self {
        let denom = denom.trim();
        if denom == "inj" {
            TokenType::Native
        } else if denom.starts_with("ibc/") {
            TokenType::Ibc
        } else if denom.starts_with("peggy0x") || denom.starts_with("0x") {
            TokenType::Erc20
        } else if denom.starts_with("factory/") {
            TokenType::TokenFactory
        } else if denom.starts_with("share") {
            TokenType::InsuranceFund
        } else if denom.starts_with("inj1") {
            TokenType::Cw20
        } else {
            TokenType::Unknown
        }
    }
}
