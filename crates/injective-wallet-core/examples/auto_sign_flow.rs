/*
[INPUT]:  A dev private key and mock broadcaster
[OUTPUT]: Console walk-through of connect, auto-sign and broadcast
[POS]:    Examples - wallet session lifecycle demonstration
[UPDATE]: When session flow changes
*/

use std::sync::Arc;

use injective_wallet_core::wallet::PrivateKeyStrategy;
use injective_wallet_core::*;
use serde_json::json;

const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Example: Auto-sign flow
///
/// 1. Connect a private-key wallet
/// 2. Grant trading permissions to an ephemeral key
/// 3. Broadcast a message signed by the ephemeral key
/// 4. Revoke and log out
#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Injective Auto-Sign Example ===\n");

    let broadcaster = Arc::new(MockBroadcaster::new());
    let strategy = Arc::new(PrivateKeyStrategy::new(DEV_PRIVATE_KEY, 1)?);
    let mut session = WalletSession::new(strategy, broadcaster.clone());

    session.connect_wallet(Wallet::PrivateKey).await?;
    let state = session.state();
    println!("✓ Connected {}", state.injective_address);
    println!("  Default subaccount: {}", state.default_subaccount_id);

    let auto_sign = session.connect_auto_sign(AutoSignOptions::default()).await?;
    println!("✓ Auto-sign enabled for {}", auto_sign.injective_address);
    println!("  Expires at {}", auto_sign.expiration);

    let order = Msg::new(
        MSG_CANCEL_SPOT_ORDER,
        json!({
            "sender": session.state().injective_address,
            "market_id": "0x0611780ba69656949525013d947713300f56c37b6175e02f26bffa495c3208fe",
            "subaccount_id": session.state().default_subaccount_id,
            "order_hash": "0x0000000000000000000000000000000000000000000000000000000000000001",
        }),
    );
    let response = session.broadcast_messages(vec![order], None).await?;
    println!("✓ Broadcast {}", response.tx_hash);

    session.disconnect_auto_sign().await?;
    session.logout().await?;
    println!("✓ Logged out ({} transactions sent)", broadcaster.requests().len());

    Ok(())
}
