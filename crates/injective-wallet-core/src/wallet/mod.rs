/*
[INPUT]:  Wallet strategies, broadcasters and persisted sessions
[OUTPUT]: Connected wallet session, keys and address helpers
[POS]:    Wallet layer - module root
[UPDATE]: When adding wallet strategies or session components
*/

pub mod address;
pub mod key;
pub mod private_key;
pub mod session;
pub mod state;
pub mod store;
pub mod strategy;

pub use address::{
    INJECTIVE_HRP, default_subaccount_id, get_ethereum_address, get_injective_address,
    is_ethereum_address, is_injective_address, subaccount_id, to_injective_address,
};
pub use key::EthSecp256k1Key;
pub use private_key::PrivateKeyStrategy;
pub use session::{AutoSignOptions, WalletSession};
pub use state::{AuthzDelegation, WalletConnectionState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use strategy::{MockWalletStrategy, WalletStrategy};
