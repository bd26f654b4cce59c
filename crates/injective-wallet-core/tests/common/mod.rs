/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for injective-wallet-core tests

#![allow(dead_code)]

use std::sync::Arc;

use injective_wallet_core::{MockBroadcaster, MockWalletStrategy, Msg, WalletSession};
use serde_json::json;
use wiremock::MockServer;

/// Ethereum address of the default test user
pub const USER_ETH: &str = "0xaf79152ac5df276d9a8e1e2e22822f9713474902";
/// Injective address of the default test user
pub const USER_INJ: &str = "inj14au322k9munkmx5wrchz9q30juf5wjgz2cfqku";
/// Well-known dev key (anvil account 0)
pub const DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_INJ: &str = "inj17w0adeg64ky0daxwd2ugyuneellmjgnxf5vkec";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub struct TestSession {
    pub session: WalletSession,
    pub strategy: Arc<MockWalletStrategy>,
    pub broadcaster: Arc<MockBroadcaster>,
}

/// Wallet session backed by mocks that enable `USER_ETH`
pub fn mock_session() -> TestSession {
    let strategy = Arc::new(MockWalletStrategy::new(
        vec![USER_ETH.to_string()],
        "mock-session",
    ));
    let broadcaster = Arc::new(MockBroadcaster::new());
    TestSession {
        session: WalletSession::new(strategy.clone(), broadcaster.clone()),
        strategy,
        broadcaster,
    }
}

pub fn send_msg() -> Msg {
    Msg::new(
        injective_wallet_core::MSG_SEND,
        json!({
            "from_address": USER_INJ,
            "to_address": DEV_INJ,
            "amount": [{"denom": "inj", "amount": "1000000000000000000"}],
        }),
    )
}
