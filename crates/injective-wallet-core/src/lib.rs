/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Injective wallet crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod authz;
pub mod broadcast;
pub mod http;
pub mod network;
pub mod token;
pub mod types;
pub mod wallet;

// Re-export commonly used types from authz
pub use authz::{AutoSignSession, BroadcastRoute, PreparedBroadcast, prepare_broadcast_messages};

// Re-export commonly used types from broadcast
pub use broadcast::{BroadcastRequest, MockBroadcaster, MsgBroadcaster};

// Re-export commonly used types from http
pub use http::{ClientConfig, RestClient, Result, WalletError};

pub use network::NetworkEndpoints;

pub use token::{PriceService, TokenFetcher, TokenService};

// Re-export all types
pub use types::*;

// Re-export commonly used types from wallet
pub use wallet::{
    AutoSignOptions, FileSessionStore, MockWalletStrategy, SessionStore, WalletConnectionState,
    WalletSession, WalletStrategy,
};
