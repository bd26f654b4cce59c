/*
[INPUT]:  Chain message type URLs and JSON payloads
[OUTPUT]: Msg envelope and type URL constants
[POS]:    Data layer - chain message envelope handed to broadcasters
[UPDATE]: When new message types are routed or labelled
*/

use serde::{Deserialize, Serialize};

pub const MSG_GRANT: &str = "/cosmos.authz.v1beta1.MsgGrant";
pub const MSG_EXEC: &str = "/cosmos.authz.v1beta1.MsgExec";
pub const MSG_REVOKE: &str = "/cosmos.authz.v1beta1.MsgRevoke";
pub const GENERIC_AUTHORIZATION: &str = "/cosmos.authz.v1beta1.GenericAuthorization";
pub const CONTRACT_EXECUTION_COMPAT_AUTHORIZATION: &str =
    "/injective.wasmx.v1.ContractExecutionCompatAuthorization";
pub const MAX_CALLS_LIMIT: &str = "/cosmwasm.wasm.v1.MaxCallsLimit";
pub const ALLOW_ALL_MESSAGES_FILTER: &str = "/cosmwasm.wasm.v1.AllowAllMessagesFilter";

pub const MSG_SEND: &str = "/cosmos.bank.v1beta1.MsgSend";
pub const MSG_EXECUTE_CONTRACT_COMPAT: &str = "/injective.wasmx.v1.MsgExecuteContractCompat";
pub const MSG_CREATE_SPOT_LIMIT_ORDER: &str = "/injective.exchange.v1beta1.MsgCreateSpotLimitOrder";
pub const MSG_CREATE_SPOT_MARKET_ORDER: &str =
    "/injective.exchange.v1beta1.MsgCreateSpotMarketOrder";
pub const MSG_CREATE_DERIVATIVE_LIMIT_ORDER: &str =
    "/injective.exchange.v1beta1.MsgCreateDerivativeLimitOrder";
pub const MSG_CREATE_DERIVATIVE_MARKET_ORDER: &str =
    "/injective.exchange.v1beta1.MsgCreateDerivativeMarketOrder";
pub const MSG_CANCEL_SPOT_ORDER: &str = "/injective.exchange.v1beta1.MsgCancelSpotOrder";
pub const MSG_CANCEL_DERIVATIVE_ORDER: &str =
    "/injective.exchange.v1beta1.MsgCancelDerivativeOrder";
pub const MSG_BATCH_CANCEL_SPOT_ORDERS: &str =
    "/injective.exchange.v1beta1.MsgBatchCancelSpotOrders";
pub const MSG_BATCH_CANCEL_DERIVATIVE_ORDERS: &str =
    "/injective.exchange.v1beta1.MsgBatchCancelDerivativeOrders";
pub const MSG_BATCH_UPDATE_ORDERS: &str = "/injective.exchange.v1beta1.MsgBatchUpdateOrders";
pub const MSG_INCREASE_POSITION_MARGIN: &str =
    "/injective.exchange.v1beta1.MsgIncreasePositionMargin";
pub const MSG_DEPOSIT: &str = "/injective.exchange.v1beta1.MsgDeposit";
pub const MSG_WITHDRAW: &str = "/injective.exchange.v1beta1.MsgWithdraw";
pub const MSG_DELEGATE: &str = "/cosmos.staking.v1beta1.MsgDelegate";

/// A chain message: type URL plus its JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Msg {
    pub type_url: String,
    pub value: serde_json::Value,
}

impl Msg {
    pub fn new(type_url: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn is_exec(&self) -> bool {
        self.type_url == MSG_EXEC
    }

    /// Human readable label for activity lists
    pub fn label(&self) -> &'static str {
        msg_type_label(&self.type_url)
    }
}

pub fn msg_type_label(type_url: &str) -> &'static str {
    match type_url {
        MSG_GRANT => "Grant",
        MSG_EXEC => "Exec",
        MSG_REVOKE => "Revoke",
        MSG_SEND => "Transfer",
        MSG_EXECUTE_CONTRACT_COMPAT => "Execute Contract",
        MSG_CREATE_SPOT_LIMIT_ORDER => "Spot Limit Order",
        MSG_CREATE_SPOT_MARKET_ORDER => "Spot Market Order",
        MSG_CREATE_DERIVATIVE_LIMIT_ORDER => "Derivative Limit Order",
        MSG_CREATE_DERIVATIVE_MARKET_ORDER => "Derivative Market Order",
        MSG_CANCEL_SPOT_ORDER => "Cancel Spot Order",
        MSG_CANCEL_DERIVATIVE_ORDER => "Cancel Derivative Order",
        MSG_BATCH_CANCEL_SPOT_ORDERS => "Batch Cancel Spot Orders",
        MSG_BATCH_CANCEL_DERIVATIVE_ORDERS => "Batch Cancel Derivative Orders",
        MSG_BATCH_UPDATE_ORDERS => "Batch Update Orders",
        MSG_INCREASE_POSITION_MARGIN => "Add Margin",
        MSG_DEPOSIT => "Subaccount Deposit",
        MSG_WITHDRAW => "Subaccount Withdraw",
        MSG_DELEGATE => "Delegate",
        _ => "Unknown",
    }
}
