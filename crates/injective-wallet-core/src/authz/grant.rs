/*
[INPUT]:  Granter/grantee addresses, message types, expirations
[OUTPUT]: MsgGrant / MsgExec / MsgRevoke envelopes
[POS]:    AuthZ layer - message builders for delegated signing
[UPDATE]: When authorization types or default auto-sign permissions change
*/

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::{
    ALLOW_ALL_MESSAGES_FILTER, CONTRACT_EXECUTION_COMPAT_AUTHORIZATION, GENERIC_AUTHORIZATION,
    MAX_CALLS_LIMIT, MSG_BATCH_CANCEL_DERIVATIVE_ORDERS, MSG_BATCH_CANCEL_SPOT_ORDERS,
    MSG_BATCH_UPDATE_ORDERS, MSG_CANCEL_DERIVATIVE_ORDER, MSG_CANCEL_SPOT_ORDER,
    MSG_CREATE_DERIVATIVE_LIMIT_ORDER, MSG_CREATE_DERIVATIVE_MARKET_ORDER,
    MSG_CREATE_SPOT_LIMIT_ORDER, MSG_CREATE_SPOT_MARKET_ORDER, MSG_EXEC,
    MSG_EXECUTE_CONTRACT_COMPAT, MSG_GRANT, MSG_INCREASE_POSITION_MARGIN, MSG_REVOKE, Msg,
};

/// One hour, used by trading flows
pub const DEFAULT_AUTO_SIGN_DURATION_SECS: u64 = 60 * 60;

/// Three days, used by long-running bot flows
pub const EXTENDED_AUTO_SIGN_DURATION_SECS: u64 = 3 * 24 * 60 * 60;

/// Message types granted to the ephemeral key unless told otherwise
pub const DEFAULT_AUTO_SIGN_MESSAGE_TYPES: &[&str] = &[
    MSG_CREATE_SPOT_LIMIT_ORDER,
    MSG_CREATE_SPOT_MARKET_ORDER,
    MSG_CREATE_DERIVATIVE_LIMIT_ORDER,
    MSG_CREATE_DERIVATIVE_MARKET_ORDER,
    MSG_CANCEL_SPOT_ORDER,
    MSG_CANCEL_DERIVATIVE_ORDER,
    MSG_BATCH_CANCEL_SPOT_ORDERS,
    MSG_BATCH_CANCEL_DERIVATIVE_ORDERS,
    MSG_BATCH_UPDATE_ORDERS,
    MSG_INCREASE_POSITION_MARGIN,
];

/// Permission to execute a contract through `MsgExecuteContractCompat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractExecutionCompatGrant {
    pub contract: String,
    pub max_calls: u64,
}

pub fn msg_grant_generic(
    granter: &str,
    grantee: &str,
    message_type: &str,
    expiration: DateTime<Utc>,
) -> Msg {
    msg_grant(
        granter,
        grantee,
        json!({
            "@type": GENERIC_AUTHORIZATION,
            "msg": message_type,
        }),
        expiration,
    )
}

pub fn msg_grant_contract_execution_compat(
    granter: &str,
    grantee: &str,
    grants: &[ContractExecutionCompatGrant],
    expiration: DateTime<Utc>,
) -> Msg {
    let grants: Vec<Value> = grants
        .iter()
        .map(|grant| {
            json!({
                "contract": grant.contract,
                "limit": {
                    "@type": MAX_CALLS_LIMIT,
                    "remaining": grant.max_calls.to_string(),
                },
                "filter": {
                    "@type": ALLOW_ALL_MESSAGES_FILTER,
                },
            })
        })
        .collect();

    msg_grant(
        granter,
        grantee,
        json!({
            "@type": CONTRACT_EXECUTION_COMPAT_AUTHORIZATION,
            "grants": grants,
        }),
        expiration,
    )
}

fn msg_grant(granter: &str, grantee: &str, authorization: Value, expiration: DateTime<Utc>) -> Msg {
    Msg::new(
        MSG_GRANT,
        json!({
            "granter": granter,
            "grantee": grantee,
            "grant": {
                "authorization": authorization,
                "expiration": expiration.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        }),
    )
}

/// Wrap `msgs` so `grantee` executes them on behalf of their signers
pub fn msg_exec(grantee: &str, msgs: Vec<Msg>) -> Msg {
    let msgs: Vec<Value> = msgs.into_iter().map(into_any_json).collect();
    Msg::new(
        MSG_EXEC,
        json!({
            "grantee": grantee,
            "msgs": msgs,
        }),
    )
}

pub fn msg_revoke(granter: &str, grantee: &str, message_type: &str) -> Msg {
    Msg::new(
        MSG_REVOKE,
        json!({
            "granter": granter,
            "grantee": grantee,
            "msg_type_url": message_type,
        }),
    )
}

/// Grant messages for an auto-sign session.
///
/// One generic grant per distinct message type, plus a single contract
/// execution grant covering every requested contract. The generic grant for
/// `MsgExecuteContractCompat` is skipped when contract grants are present, as
/// both would land on the same (granter, grantee, type) slot.
pub fn build_auto_sign_grants(
    granter: &str,
    grantee: &str,
    message_types: &[String],
    contract_grants: &[ContractExecutionCompatGrant],
    expiration: DateTime<Utc>,
) -> Vec<Msg> {
    let mut msgs: Vec<Msg> = dedup_message_types(message_types)
        .into_iter()
        .filter(|message_type| {
            contract_grants.is_empty() || message_type != MSG_EXECUTE_CONTRACT_COMPAT
        })
        .map(|message_type| msg_grant_generic(granter, grantee, &message_type, expiration))
        .collect();

    if !contract_grants.is_empty() {
        msgs.push(msg_grant_contract_execution_compat(
            granter,
            grantee,
            contract_grants,
            expiration,
        ));
    }

    msgs
}

/// Revocations matching `build_auto_sign_grants`
pub fn build_auto_sign_revokes(
    granter: &str,
    grantee: &str,
    message_types: &[String],
    contract_grants: &[ContractExecutionCompatGrant],
) -> Vec<Msg> {
    let mut types = dedup_message_types(message_types);
    if !contract_grants.is_empty() && !types.iter().any(|t| t == MSG_EXECUTE_CONTRACT_COMPAT) {
        types.push(MSG_EXECUTE_CONTRACT_COMPAT.to_string());
    }
    types
        .iter()
        .map(|message_type| msg_revoke(granter, grantee, message_type))
        .collect()
}

fn dedup_message_types(message_types: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(message_types.len());
    for message_type in message_types {
        let message_type = message_type.trim();
        if !message_type.is_empty() && !seen.iter().any(|t: &String| t == message_type) {
            seen.push(message_type.to_string());
        }
    }
    seen
}

fn into_any_json(msg: Msg) -> Value {
    match msg.value {
        Value::Object(mut fields) => {
            fields.insert("@type".to_string(), Value::String(msg.type_url));
            Value::Object(fields)
        }
        other => json!({
            "@type": msg.type_url,
            "value": other,
        }),
    }
}
