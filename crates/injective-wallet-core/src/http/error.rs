/*
[INPUT]:  Error sources (wallet strategy, broadcaster, HTTP, serialization, storage)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new failure domains or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::Wallet;

/// Main error type for the wallet layer
#[derive(Error, Debug)]
pub enum WalletError {
    /// Browser extension for the wallet was not detected
    #[error("{wallet} is not installed")]
    WalletNotInstalled { wallet: Wallet },

    /// Selected address does not belong to the connected wallet
    #[error("Wrong address: {address} is not managed by the connected wallet")]
    WrongAddress { address: String },

    /// Wallet is on a different Ethereum chain than configured
    #[error("Wrong chain: expected ethereum chain id {expected}, wallet is on {actual}")]
    WrongChain { expected: u64, actual: u64 },

    /// No wallet connected
    #[error("No wallet connected")]
    NotConnected,

    /// Address could not be parsed or converted
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Auto-sign and authz delegation are both active
    #[error("Auto-sign and authz delegation cannot be used together")]
    AutoSignAuthzConflict,

    /// Auto-sign session missing or unusable
    #[error("Auto-sign error: {0}")]
    AutoSign(String),

    /// Another transaction is already being broadcast
    #[error("A transaction is already in progress")]
    QueueBusy,

    /// Wallet strategy failure (rejected request, locked wallet, ...)
    #[error("Wallet strategy error: {0}")]
    Strategy(String),

    /// Broadcaster failure
    #[error("Broadcast failed: {0}")]
    Broadcast(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Session storage failed
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Key material could not be generated, parsed or used
    #[error("Key error: {0}")]
    Key(String),
}

impl WalletError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            WalletError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            WalletError::Api { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            WalletError::Api { code: 429, .. } => Some(2),
            _ if self.is_retryable() => Some(1),
            _ => None,
        }
    }

    /// Check if the error comes from the user's wallet rather than the network
    pub fn is_wallet_error(&self) -> bool {
        matches!(
            self,
            WalletError::WalletNotInstalled { .. }
                | WalletError::WrongAddress { .. }
                | WalletError::WrongChain { .. }
                | WalletError::NotConnected
                | WalletError::Strategy(_)
        )
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        WalletError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    pub fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        WalletError::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;
