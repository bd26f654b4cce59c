/*
[INPUT]:  Connection state, outgoing messages and the current time
[OUTPUT]: Messages wrapped for the chosen signing route plus the signer
[POS]:    AuthZ layer - decides between direct, authz and auto-sign broadcasting
[UPDATE]: When routing policy changes
*/

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::authz::msg_exec;
use crate::broadcast::BroadcastRequest;
use crate::http::{Result, WalletError};
use crate::types::Msg;
use crate::wallet::WalletConnectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastRoute {
    /// Signed by the connected wallet as-is
    Direct,
    /// Wrapped in MsgExec with the connected wallet as grantee
    AuthzExec,
    /// Wrapped in MsgExec and signed by the ephemeral key
    AutoSign,
}

/// Who signs the routed transaction
#[derive(Clone, PartialEq, Eq)]
pub enum TxSigner {
    Wallet {
        injective_address: String,
        ethereum_address: Option<String>,
    },
    Ephemeral {
        injective_address: String,
        private_key_hex: String,
    },
}

impl TxSigner {
    pub fn injective_address(&self) -> &str {
        match self {
            Self::Wallet {
                injective_address, ..
            }
            | Self::Ephemeral {
                injective_address, ..
            } => injective_address,
        }
    }
}

impl fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet {
                injective_address,
                ethereum_address,
            } => f
                .debug_struct("Wallet")
                .field("injective_address", injective_address)
                .field("ethereum_address", ethereum_address)
                .finish(),
            Self::Ephemeral {
                injective_address, ..
            } => f
                .debug_struct("Ephemeral")
                .field("injective_address", injective_address)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBroadcast {
    pub route: BroadcastRoute,
    pub msgs: Vec<Msg>,
    pub signer: TxSigner,
}

impl PreparedBroadcast {
    pub fn into_request(self, memo: Option<String>) -> BroadcastRequest {
        let (injective_address, ethereum_address, private_key_hex) = match self.signer {
            TxSigner::Wallet {
                injective_address,
                ethereum_address,
            } => (injective_address, ethereum_address, None),
            TxSigner::Ephemeral {
                injective_address,
                private_key_hex,
            } => (injective_address, None, Some(private_key_hex)),
        };

        BroadcastRequest {
            ethereum_address,
            private_key_hex,
            ..BroadcastRequest::new(self.msgs, injective_address)
        }
        .with_memo(memo)
    }
}

/// Route `msgs` according to the current delegation and auto-sign state.
///
/// Auto-sign and authz together are rejected before anything is built: the
/// ephemeral key holds grants from the user, not from the authz granter.
pub fn prepare_broadcast_messages(
    state: &WalletConnectionState,
    msgs: Vec<Msg>,
    now: DateTime<Utc>,
) -> Result<PreparedBroadcast> {
    let auto_sign = state
        .auto_sign
        .as_ref()
        .filter(|session| session.is_usable_at(now));
    let authz_active = state.authz.is_active();

    match (auto_sign, authz_active) {
        (Some(_), true) => Err(WalletError::AutoSignAuthzConflict),
        (Some(session), false) => {
            debug!(
                grantee = %session.injective_address,
                granter = %session.granter,
                count = msgs.len(),
                "routing through auto-sign"
            );
            Ok(PreparedBroadcast {
                route: BroadcastRoute::AutoSign,
                msgs: vec![msg_exec(&session.injective_address, msgs)],
                signer: TxSigner::Ephemeral {
                    injective_address: session.injective_address.clone(),
                    private_key_hex: session.private_key_hex.clone(),
                },
            })
        }
        (None, true) => {
            debug!(
                grantee = %state.injective_address,
                granter = %state.authz.injective_address,
                count = msgs.len(),
                "routing through authz"
            );
            Ok(PreparedBroadcast {
                route: BroadcastRoute::AuthzExec,
                msgs: vec![msg_exec(&state.injective_address, msgs)],
                signer: wallet_signer(state),
            })
        }
        (None, false) => Ok(PreparedBroadcast {
            route: BroadcastRoute::Direct,
            msgs,
            signer: wallet_signer(state),
        }),
    }
}

fn wallet_signer(state: &WalletConnectionState) -> TxSigner {
    TxSigner::Wallet {
        injective_address: state.injective_address.clone(),
        ethereum_address: state.ethereum_address(),
    }
}
