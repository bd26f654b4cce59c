/*
[INPUT]:  Granter/grantee addresses, permissions and connection state
[OUTPUT]: Grant messages, auto-sign sessions and broadcast routing
[POS]:    AuthZ layer - delegated and unattended signing
[UPDATE]: When adding authorization types or routing rules
*/

pub mod grant;
pub mod router;
pub mod session;

pub use grant::{
    ContractExecutionCompatGrant, DEFAULT_AUTO_SIGN_DURATION_SECS,
    DEFAULT_AUTO_SIGN_MESSAGE_TYPES, EXTENDED_AUTO_SIGN_DURATION_SECS, build_auto_sign_grants,
    build_auto_sign_revokes, msg_exec, msg_grant_contract_execution_compat, msg_grant_generic,
    msg_revoke,
};
pub use router::{BroadcastRoute, PreparedBroadcast, TxSigner, prepare_broadcast_messages};
pub use session::AutoSignSession;
