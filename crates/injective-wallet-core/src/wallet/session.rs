/*
[INPUT]:  Wallet strategy, message broadcaster and auto-sign session store
[OUTPUT]: Connected wallet state and broadcast transaction responses
[POS]:    Wallet layer - orchestrates connect, authz, auto-sign and broadcasting
[UPDATE]: When connection flow steps or broadcast routing hand-off change
*/

use std::collections::BTreeSet;
use std::fmt;
use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::authz::{
    AutoSignSession, BroadcastRoute, ContractExecutionCompatGrant,
    DEFAULT_AUTO_SIGN_DURATION_SECS, DEFAULT_AUTO_SIGN_MESSAGE_TYPES,
    EXTENDED_AUTO_SIGN_DURATION_SECS, build_auto_sign_grants, build_auto_sign_revokes,
    prepare_broadcast_messages,
};
use crate::broadcast::{BroadcastRequest, MsgBroadcaster, TxQueue};
use crate::http::{Result, WalletError};
use crate::types::{Msg, QueueStatus, TxResponse, Wallet, WalletConnectStatus};
use crate::wallet::address::{default_subaccount_id, to_injective_address};
use crate::wallet::{
    AuthzDelegation, EthSecp256k1Key, MemorySessionStore, SessionStore, WalletConnectionState,
    WalletStrategy,
};

const DEFAULT_ETHEREUM_CHAIN_ID: u64 = 1;

/// What an auto-sign session is allowed to do, and for how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSignOptions {
    pub message_types: Vec<String>,
    pub contract_execution_compat: Vec<ContractExecutionCompatGrant>,
    pub duration_seconds: u64,
}

impl Default for AutoSignOptions {
    fn default() -> Self {
        Self {
            message_types: DEFAULT_AUTO_SIGN_MESSAGE_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            contract_execution_compat: Vec::new(),
            duration_seconds: DEFAULT_AUTO_SIGN_DURATION_SECS,
        }
    }
}

impl AutoSignOptions {
    /// Default permissions over the three day window
    pub fn extended() -> Self {
        Self {
            duration_seconds: EXTENDED_AUTO_SIGN_DURATION_SECS,
            ..Self::default()
        }
    }
}

/// Owns the connection state and sequences calls against the wallet capabilities
pub struct WalletSession {
    strategy: Arc<dyn WalletStrategy>,
    broadcaster: Arc<dyn MsgBroadcaster>,
    store: Arc<dyn SessionStore>,
    ethereum_chain_id: u64,
    state: WalletConnectionState,
    status: WalletConnectStatus,
    queue: TxQueue,
}

impl WalletSession {
    /// Create a session with an in-memory auto-sign store
    pub fn new(strategy: Arc<dyn WalletStrategy>, broadcaster: Arc<dyn MsgBroadcaster>) -> Self {
        Self {
            strategy,
            broadcaster,
            store: Arc::new(MemorySessionStore::new()),
            ethereum_chain_id: DEFAULT_ETHEREUM_CHAIN_ID,
            state: WalletConnectionState::default(),
            status: WalletConnectStatus::Idle,
            queue: TxQueue::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Chain id EVM wallets must be on for `validate` to pass
    pub fn with_ethereum_chain_id(mut self, chain_id: u64) -> Self {
        self.ethereum_chain_id = chain_id;
        self
    }

    pub fn state(&self) -> &WalletConnectionState {
        &self.state
    }

    pub fn status(&self) -> WalletConnectStatus {
        self.status
    }

    pub fn queue_status(&self) -> QueueStatus {
        self.queue.status()
    }

    pub fn is_user_connected(&self) -> bool {
        self.state.is_user_connected(self.status)
    }

    pub fn is_authz_wallet_connected(&self) -> bool {
        self.state.is_authz_wallet_connected(self.status)
    }

    pub fn is_auto_sign_enabled(&self) -> bool {
        self.state.is_auto_sign_enabled(Utc::now())
    }

    /// Refresh which extension wallets are present
    pub async fn detect_installed_wallets(&mut self) -> &BTreeSet<Wallet> {
        let mut installed = BTreeSet::new();
        for wallet in Wallet::EXTENSIONS {
            if self.strategy.is_wallet_installed(wallet).await {
                installed.insert(wallet);
            }
        }
        debug!(count = installed.len(), "detected installed wallets");
        self.state.installed = installed;
        &self.state.installed
    }

    /// Connect using the first address the wallet enables
    pub async fn connect_wallet(&mut self, wallet: Wallet) -> Result<()> {
        self.connect(wallet, None).await
    }

    /// Connect using a specific enabled address (hardware wallets)
    pub async fn connect_wallet_with_address(&mut self, wallet: Wallet, address: &str) -> Result<()> {
        self.connect(wallet, Some(address)).await
    }

    async fn connect(&mut self, wallet: Wallet, address: Option<&str>) -> Result<()> {
        self.status = WalletConnectStatus::Connecting;

        match self.try_connect(wallet, address).await {
            Ok(()) => {
                self.status = WalletConnectStatus::Connected;
                info!(
                    wallet = %wallet,
                    address = %self.state.injective_address,
                    auto_sign = self.state.auto_sign.is_some(),
                    "wallet connected"
                );
                Ok(())
            }
            Err(err) => {
                warn!(wallet = %wallet, error = %err, "wallet connection failed");
                self.state.reset();
                self.status = WalletConnectStatus::Disconnected;
                Err(err)
            }
        }
    }

    async fn try_connect(&mut self, wallet: Wallet, address: Option<&str>) -> Result<()> {
        // A previous wallet's delegation and auto-sign session never carry over
        let hw_addresses = mem::take(&mut self.state.hw_addresses);
        self.state.reset();
        if address.is_some() {
            self.state.hw_addresses = hw_addresses;
        }

        if wallet.requires_extension() && !self.strategy.is_wallet_installed(wallet).await {
            return Err(WalletError::WalletNotInstalled { wallet });
        }

        self.strategy.set_wallet(wallet).await?;
        let addresses = self.strategy.enable_and_get_addresses().await?;

        let address = match address {
            Some(chosen) => addresses
                .iter()
                .find(|enabled| enabled.eq_ignore_ascii_case(chosen))
                .cloned()
                .ok_or_else(|| WalletError::WrongAddress {
                    address: chosen.to_string(),
                })?,
            None => addresses.first().cloned().ok_or_else(|| {
                WalletError::Strategy(format!("{wallet} returned no addresses"))
            })?,
        };

        let injective_address = to_injective_address(&address)?;
        let confirmation = self.strategy.get_session_or_confirm(&address).await?;

        self.state.wallet = wallet;
        self.state.default_subaccount_id = default_subaccount_id(&injective_address)?;
        self.state.address = address;
        self.state.injective_address = injective_address;
        self.state.session = confirmation.clone();
        self.state.address_confirmation = confirmation;
        self.state.addresses = addresses;
        self.state.auto_sign = self.restore_auto_sign();

        Ok(())
    }

    /// Persisted session for the connected address, if its key is intact
    fn restore_auto_sign(&self) -> Option<AutoSignSession> {
        let granter = &self.state.injective_address;
        let session = match self.store.load(granter) {
            Ok(session) => session?,
            Err(err) => {
                warn!(granter = %granter, error = %err, "failed to load auto-sign session");
                return None;
            }
        };

        match session.key() {
            Ok(key) if key.injective_address() == session.injective_address => {
                debug!(
                    granter = %granter,
                    grantee = %session.injective_address,
                    expiration = %session.expiration,
                    "restored auto-sign session"
                );
                Some(session)
            }
            _ => {
                warn!(granter = %granter, "stored auto-sign key does not match its address, ignoring");
                None
            }
        }
    }

    /// List hardware wallet addresses so the user can pick one
    pub async fn fetch_hardware_addresses(&mut self, wallet: Wallet) -> Result<Vec<String>> {
        self.strategy.set_wallet(wallet).await?;
        let addresses = self.strategy.get_addresses().await?;
        debug!(wallet = %wallet, count = addresses.len(), "fetched hardware addresses");
        self.state.hw_addresses = addresses.clone();
        Ok(addresses)
    }

    /// EVM wallets must sit on the configured Ethereum chain
    pub async fn validate(&self) -> Result<()> {
        self.ensure_connected()?;
        if !self.state.wallet.is_evm() {
            return Ok(());
        }

        let actual = self.strategy.get_ethereum_chain_id().await?;
        if actual != self.ethereum_chain_id {
            return Err(WalletError::WrongChain {
                expected: self.ethereum_chain_id,
                actual,
            });
        }
        Ok(())
    }

    /// Act on behalf of `granter` through authz from now on
    pub fn connect_authz(&mut self, granter: &str) -> Result<()> {
        self.ensure_connected()?;
        let delegation = AuthzDelegation::for_granter(granter)?;
        if delegation.injective_address == self.state.injective_address {
            return Err(WalletError::invalid_address(
                granter,
                "granter is the connected wallet",
            ));
        }

        info!(
            grantee = %self.state.injective_address,
            granter = %delegation.injective_address,
            "authz delegation connected"
        );
        self.state.authz = delegation;
        Ok(())
    }

    pub fn disconnect_authz(&mut self) {
        if self.state.authz.is_active() {
            info!(granter = %self.state.authz.injective_address, "authz delegation disconnected");
        }
        self.state.authz = AuthzDelegation::default();
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.status = WalletConnectStatus::Disconnecting;

        if let Err(err) = self.strategy.disconnect().await {
            warn!(error = %err, "wallet strategy disconnect failed");
        }

        let granter = self.state.injective_address.clone();
        if !granter.is_empty() {
            if let Err(err) = self.store.remove(&granter) {
                warn!(granter = %granter, error = %err, "failed to drop auto-sign session");
            }
        }

        self.state.reset();
        self.queue.reset();
        self.status = WalletConnectStatus::Disconnected;
        info!(address = %granter, "wallet logged out");
        Ok(())
    }

    /// Claim the transaction queue
    pub fn queue(&mut self) -> Result<()> {
        self.queue.queue()
    }

    pub fn reset_queue(&mut self) {
        self.queue.reset();
    }

    /// Route `msgs` and hand them to the broadcaster
    pub async fn broadcast_messages(
        &mut self,
        msgs: Vec<Msg>,
        memo: Option<String>,
    ) -> Result<TxResponse> {
        self.ensure_connected()?;
        self.queue.queue()?;
        let result = self.route_and_broadcast(msgs, memo).await;
        self.queue.reset();
        result
    }

    async fn route_and_broadcast(
        &mut self,
        msgs: Vec<Msg>,
        memo: Option<String>,
    ) -> Result<TxResponse> {
        let now = Utc::now();
        if let Some(expired) = self.renewable_auto_sign(now) {
            self.refresh_auto_sign(&expired, now).await?;
        }

        let prepared = prepare_broadcast_messages(&self.state, msgs, now)?;
        let route = prepared.route;
        let request = prepared.into_request(memo);

        let response = match route {
            BroadcastRoute::AutoSign => self.broadcaster.broadcast(request).await?,
            BroadcastRoute::Direct | BroadcastRoute::AuthzExec if self.state.wallet.is_evm() => {
                self.broadcaster.broadcast_v2(request).await?
            }
            BroadcastRoute::Direct | BroadcastRoute::AuthzExec => {
                self.broadcaster.broadcast(request).await?
            }
        };

        info!(route = ?route, tx_hash = %response.tx_hash, "messages broadcast");
        Ok(response)
    }

    /// Expired session that can be renewed; never while authz is active
    fn renewable_auto_sign(&self, now: DateTime<Utc>) -> Option<AutoSignSession> {
        if self.state.authz.is_active() {
            return None;
        }
        self.state
            .auto_sign
            .as_ref()
            .filter(|session| session.is_expired_at(now))
            .cloned()
    }

    /// Grant permissions to a fresh ephemeral key and start auto-signing
    pub async fn connect_auto_sign(&mut self, options: AutoSignOptions) -> Result<AutoSignSession> {
        self.ensure_connected()?;
        if self.state.authz.is_active() {
            return Err(WalletError::AutoSignAuthzConflict);
        }
        if options.message_types.is_empty() && options.contract_execution_compat.is_empty() {
            return Err(WalletError::AutoSign(
                "no message types or contracts to grant".to_string(),
            ));
        }

        self.queue.queue()?;
        let result = self.start_auto_sign(options).await;
        self.queue.reset();
        result
    }

    async fn start_auto_sign(&mut self, options: AutoSignOptions) -> Result<AutoSignSession> {
        let now = Utc::now();
        let key = EthSecp256k1Key::generate()?;
        let session = AutoSignSession::new(
            &self.state.injective_address,
            &key,
            now,
            options.duration_seconds,
            options.message_types,
            options.contract_execution_compat,
        );

        self.issue_grants(&session).await?;
        self.activate_auto_sign(session.clone());
        Ok(session)
    }

    /// Renew the stored session if it has expired; a live one is returned untouched
    pub async fn validate_auto_sign(&mut self) -> Result<AutoSignSession> {
        self.ensure_connected()?;
        if self.state.authz.is_active() {
            return Err(WalletError::AutoSignAuthzConflict);
        }
        let session = match self.state.auto_sign.clone() {
            Some(session) => session,
            None => self.restore_auto_sign().ok_or_else(|| {
                WalletError::AutoSign("no auto-sign session for this wallet".to_string())
            })?,
        };

        let now = Utc::now();
        if !session.is_expired_at(now) {
            self.state.auto_sign = Some(session.clone());
            return Ok(session);
        }

        self.queue.queue()?;
        let result = self.refresh_auto_sign(&session, now).await;
        self.queue.reset();
        result
    }

    async fn refresh_auto_sign(
        &mut self,
        expired: &AutoSignSession,
        now: DateTime<Utc>,
    ) -> Result<AutoSignSession> {
        info!(
            grantee = %expired.injective_address,
            expired_at = %expired.expiration,
            "renewing auto-sign grants"
        );
        let renewed = expired.renewed(now);
        self.issue_grants(&renewed).await?;
        self.activate_auto_sign(renewed.clone());
        Ok(renewed)
    }

    async fn issue_grants(&self, session: &AutoSignSession) -> Result<TxResponse> {
        let msgs = build_auto_sign_grants(
            &session.granter,
            &session.injective_address,
            &session.message_types,
            &session.contract_execution_compat,
            session.expiration,
        );
        debug!(
            grantee = %session.injective_address,
            grants = msgs.len(),
            "issuing auto-sign grants"
        );

        let response = self
            .broadcaster
            .broadcast_with_fee_delegation(self.wallet_request(msgs))
            .await?;
        info!(
            grantee = %session.injective_address,
            expiration = %session.expiration,
            tx_hash = %response.tx_hash,
            "auto-sign grants issued"
        );
        Ok(response)
    }

    fn activate_auto_sign(&mut self, session: AutoSignSession) {
        if let Err(err) = self.store.save(&session) {
            warn!(granter = %session.granter, error = %err, "failed to persist auto-sign session");
        }
        self.state.auto_sign = Some(session);
    }

    /// Revoke the ephemeral key's grants and forget the session
    pub async fn disconnect_auto_sign(&mut self) -> Result<()> {
        self.ensure_connected()?;
        let Some(session) = self.state.auto_sign.clone() else {
            return Ok(());
        };

        if session.is_expired_at(Utc::now()) {
            debug!(grantee = %session.injective_address, "auto-sign grants already expired, skipping revoke");
        } else {
            self.queue.queue()?;
            let result = self.revoke_grants(&session).await;
            self.queue.reset();
            result?;
        }

        if let Err(err) = self.store.remove(&session.granter) {
            warn!(granter = %session.granter, error = %err, "failed to drop auto-sign session");
        }
        self.state.auto_sign = None;
        info!(grantee = %session.injective_address, "auto-sign disconnected");
        Ok(())
    }

    async fn revoke_grants(&self, session: &AutoSignSession) -> Result<TxResponse> {
        let msgs = build_auto_sign_revokes(
            &session.granter,
            &session.injective_address,
            &session.message_types,
            &session.contract_execution_compat,
        );
        self.broadcaster
            .broadcast_with_fee_delegation(self.wallet_request(msgs))
            .await
    }

    fn wallet_request(&self, msgs: Vec<Msg>) -> BroadcastRequest {
        BroadcastRequest {
            ethereum_address: self.state.ethereum_address(),
            ..BroadcastRequest::new(msgs, self.state.injective_address.clone())
        }
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_user_connected() {
            Ok(())
        } else {
            Err(WalletError::NotConnected)
        }
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("ethereum_chain_id", &self.ethereum_chain_id)
            .field("status", &self.status)
            .field("queue", &self.queue.status())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use serde_json::json;

    use crate::broadcast::{BroadcastMode, MockBroadcaster};
    use crate::types::{MSG_CANCEL_SPOT_ORDER, MSG_EXEC, MSG_GRANT, MSG_REVOKE};
    use crate::wallet::MockWalletStrategy;

    const USER_ETH: &str = "0xaf79152ac5df276d9a8e1e2e22822f9713474902";
    const USER_INJ: &str = "inj14au322k9munkmx5wrchz9q30juf5wjgz2cfqku";
    const GRANTER: &str = "inj17w0adeg64ky0daxwd2ugyuneellmjgnxf5vkec";

    fn setup() -> (WalletSession, Arc<MockWalletStrategy>, Arc<MockBroadcaster>) {
        let strategy = Arc::new(MockWalletStrategy::new(
            vec![USER_ETH.to_string()],
            "session-token",
        ));
        let broadcaster = Arc::new(MockBroadcaster::new());
        let session = WalletSession::new(strategy.clone(), broadcaster.clone());
        (session, strategy, broadcaster)
    }

    fn msgs() -> Vec<Msg> {
        vec![Msg::new(MSG_CANCEL_SPOT_ORDER, json!({"sender": USER_INJ}))]
    }

    #[tokio::test]
    async fn test_connect_populates_state() {
        let (mut session, strategy, _) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();

        assert_eq!(session.status(), WalletConnectStatus::Connected);
        assert!(session.is_user_connected());
        assert_eq!(session.state().injective_address, USER_INJ);
        assert_eq!(session.state().default_subaccount_id.len(), 66);
        assert_eq!(
            strategy.calls(),
            vec!["set_wallet", "enable_and_get_addresses", "get_session_or_confirm"]
        );
    }

    #[tokio::test]
    async fn test_connect_failure_resets_state() {
        let strategy = Arc::new(MockWalletStrategy::new(vec![], "").rejecting());
        let mut session = WalletSession::new(strategy, Arc::new(MockBroadcaster::new()));
        session.detect_installed_wallets().await;

        assert!(session.connect_wallet(Wallet::Metamask).await.is_err());
        assert_eq!(session.status(), WalletConnectStatus::Disconnected);
        assert!(session.state().address.is_empty());
        assert!(!session.state().installed.is_empty());
    }

    #[tokio::test]
    async fn test_connect_requires_installed_extension() {
        let strategy = Arc::new(
            MockWalletStrategy::new(vec![USER_ETH.to_string()], "s").with_installed(&[]),
        );
        let mut session = WalletSession::new(strategy.clone(), Arc::new(MockBroadcaster::new()));

        let err = session.connect_wallet(Wallet::Rabby).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletNotInstalled { wallet: Wallet::Rabby }));
        assert!(strategy.calls().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_requires_connection() {
        let (mut session, _, broadcaster) = setup();
        let err = session.broadcast_messages(msgs(), None).await.unwrap_err();
        assert!(matches!(err, WalletError::NotConnected));
        assert!(broadcaster.requests().is_empty());
    }

    #[tokio::test]
    async fn test_direct_broadcast_resets_queue() {
        let (mut session, _, broadcaster) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();

        session.broadcast_messages(msgs(), None).await.unwrap();
        assert_eq!(session.queue_status(), QueueStatus::Idle);

        let (mode, request) = broadcaster.last_request().unwrap();
        assert_eq!(mode, BroadcastMode::V2);
        assert_eq!(request.msgs, msgs());
        assert_eq!(request.ethereum_address.as_deref(), Some(USER_ETH));
    }

    #[tokio::test]
    async fn test_busy_queue_rejects_broadcast() {
        let (mut session, _, broadcaster) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();
        session.queue().unwrap();

        let err = session.broadcast_messages(msgs(), None).await.unwrap_err();
        assert!(matches!(err, WalletError::QueueBusy));
        assert!(broadcaster.requests().is_empty());
    }

    #[tokio::test]
    async fn test_connect_auto_sign_issues_grants() {
        let (mut session, _, broadcaster) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();

        let auto_sign = session
            .connect_auto_sign(AutoSignOptions::default())
            .await
            .unwrap();
        assert!(session.is_auto_sign_enabled());
        assert_eq!(auto_sign.granter, USER_INJ);

        let (mode, request) = broadcaster.last_request().unwrap();
        assert_eq!(mode, BroadcastMode::FeeDelegation);
        assert_eq!(request.msgs.len(), DEFAULT_AUTO_SIGN_MESSAGE_TYPES.len());
        assert!(request.msgs.iter().all(|msg| msg.type_url == MSG_GRANT));
        assert_eq!(request.injective_address, USER_INJ);

        session.broadcast_messages(msgs(), None).await.unwrap();
        let (mode, request) = broadcaster.last_request().unwrap();
        assert_eq!(mode, BroadcastMode::Standard);
        assert_eq!(request.msgs[0].type_url, MSG_EXEC);
        assert_eq!(request.injective_address, auto_sign.injective_address);
    }

    #[tokio::test]
    async fn test_auto_sign_rejected_while_authz_active() {
        let (mut session, _, broadcaster) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();
        session.connect_authz(GRANTER).unwrap();

        let err = session
            .connect_auto_sign(AutoSignOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::AutoSignAuthzConflict));
        assert!(broadcaster.requests().is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_is_renewed_before_broadcast() {
        let store = Arc::new(MemorySessionStore::new());
        let key = EthSecp256k1Key::generate().unwrap();
        let expired = AutoSignSession::new(
            USER_INJ,
            &key,
            Utc::now() - Duration::hours(2),
            3600,
            vec![MSG_CANCEL_SPOT_ORDER.to_string()],
            vec![],
        );
        store.save(&expired).unwrap();

        let (session, _, broadcaster) = setup();
        let mut session = session.with_store(store.clone());
        session.connect_wallet(Wallet::Metamask).await.unwrap();
        assert!(!session.is_auto_sign_enabled());

        session.broadcast_messages(msgs(), None).await.unwrap();

        let requests = broadcaster.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, BroadcastMode::FeeDelegation);
        assert_eq!(requests[0].1.msgs[0].type_url, MSG_GRANT);
        assert_eq!(requests[1].0, BroadcastMode::Standard);
        assert_eq!(requests[1].1.injective_address, key.injective_address());

        let renewed = store.load(USER_INJ).unwrap().unwrap();
        assert!(renewed.expiration > Utc::now());
        assert_eq!(renewed.private_key_hex, expired.private_key_hex);
    }

    #[tokio::test]
    async fn test_disconnect_auto_sign_revokes() {
        let (mut session, _, broadcaster) = setup();
        session.connect_wallet(Wallet::Metamask).await.unwrap();
        session
            .connect_auto_sign(AutoSignOptions {
                message_types: vec![MSG_CANCEL_SPOT_ORDER.to_string()],
                ..AutoSignOptions::default()
            })
            .await
            .unwrap();

        session.disconnect_auto_sign().await.unwrap();
        assert!(session.state().auto_sign.is_none());

        let (_, request) = broadcaster.last_request().unwrap();
        assert_eq!(request.msgs.len(), 1);
        assert_eq!(request.msgs[0].type_url, MSG_REVOKE);
    }

    #[tokio::test]
    async fn test_validate_wrong_chain() {
        let strategy = Arc::new(
            MockWalletStrategy::new(vec![USER_ETH.to_string()], "s").with_ethereum_chain_id(5),
        );
        let mut session = WalletSession::new(strategy, Arc::new(MockBroadcaster::new()))
            .with_ethereum_chain_id(1);
        session.connect_wallet(Wallet::Metamask).await.unwrap();

        let err = session.validate().await.unwrap_err();
        assert!(matches!(
            err,
            WalletError::WrongChain {
                expected: 1,
                actual: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_logout_returns_factory_shape() {
        let (mut session, strategy, _) = setup();
        session.detect_installed_wallets().await;
        let installed = session.state().installed.clone();

        session.connect_wallet(Wallet::Metamask).await.unwrap();
        session.connect_authz(GRANTER).unwrap();
        session.logout().await.unwrap();

        let expected = WalletConnectionState {
            installed,
            ..WalletConnectionState::default()
        };
        assert_eq!(session.state(), &expected);
        assert_eq!(session.status(), WalletConnectStatus::Disconnected);
        assert!(strategy.calls().contains(&"disconnect".to_string()));
    }
}
