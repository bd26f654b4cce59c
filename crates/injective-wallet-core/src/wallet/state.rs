/*
[INPUT]:  Connect/disconnect results from the wallet session
[OUTPUT]: Connection record and derived connection booleans
[POS]:    Wallet layer - the single mutable record behind a wallet session
[UPDATE]: When connection fields or derived flags change
*/

use std::collections::BTreeSet;
use std::mem;

use chrono::{DateTime, Utc};

use crate::authz::AutoSignSession;
use crate::http::Result;
use crate::types::{Wallet, WalletConnectStatus};
use crate::wallet::address::{default_subaccount_id, get_ethereum_address, to_injective_address};

/// The address the connected wallet acts for under authz
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthzDelegation {
    pub address: String,
    pub injective_address: String,
    pub default_subaccount_id: String,
}

impl AuthzDelegation {
    /// Build a delegation record from either address format
    pub fn for_granter(granter: &str) -> Result<Self> {
        let injective_address = to_injective_address(granter)?;
        Ok(Self {
            address: get_ethereum_address(&injective_address)?,
            default_subaccount_id: default_subaccount_id(&injective_address)?,
            injective_address,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.injective_address.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletConnectionState {
    pub wallet: Wallet,
    /// Address as handed out by the wallet (`0x` for EVM wallets, `inj` for Cosmos wallets)
    pub address: String,
    pub injective_address: String,
    pub default_subaccount_id: String,
    pub session: String,
    pub address_confirmation: String,
    pub addresses: Vec<String>,
    pub hw_addresses: Vec<String>,
    pub authz: AuthzDelegation,
    pub auto_sign: Option<AutoSignSession>,
    /// Extensions detected in the environment; survives resets
    pub installed: BTreeSet<Wallet>,
}

impl WalletConnectionState {
    pub fn is_user_connected(&self, status: WalletConnectStatus) -> bool {
        !self.address.is_empty()
            && !self.injective_address.is_empty()
            && !self.address_confirmation.is_empty()
            && !self.session.is_empty()
            && status != WalletConnectStatus::Connecting
    }

    pub fn is_authz_wallet_connected(&self, status: WalletConnectStatus) -> bool {
        self.is_user_connected(status) && self.authz.is_active()
    }

    pub fn is_auto_sign_enabled(&self, now: DateTime<Utc>) -> bool {
        self.auto_sign
            .as_ref()
            .is_some_and(|session| session.is_usable_at(now))
    }

    /// `0x` address of the connected wallet, for EVM wallets only
    pub fn ethereum_address(&self) -> Option<String> {
        if self.wallet.is_evm() && !self.address.is_empty() {
            Some(self.address.clone())
        } else {
            None
        }
    }

    /// Back to the factory shape, keeping installed-extension flags
    pub fn reset(&mut self) {
        let installed = mem::take(&mut self.installed);
        *self = Self {
            installed,
            ..Self::default()
        };
    }
}
