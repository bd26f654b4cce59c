/*
[INPUT]:  Connection states with and without delegation or auto-sign
[OUTPUT]: Test results for broadcast routing
[POS]:    Integration tests - authz/auto-sign routing policy
[UPDATE]: When routing rules change
*/

mod common;

use chrono::{Duration, Utc};
use common::{DEV_INJ, USER_ETH, USER_INJ, send_msg};
use injective_wallet_core::authz::{AutoSignSession, BroadcastRoute, prepare_broadcast_messages};
use injective_wallet_core::wallet::{AuthzDelegation, EthSecp256k1Key};
use injective_wallet_core::{MSG_EXEC, Wallet, WalletConnectionState, WalletError};
use rstest::rstest;
use tokio_test::assert_ok;

fn connected_state() -> WalletConnectionState {
    WalletConnectionState {
        wallet: Wallet::Metamask,
        address: USER_ETH.to_string(),
        injective_address: USER_INJ.to_string(),
        session: "session".to_string(),
        address_confirmation: "confirmation".to_string(),
        ..WalletConnectionState::default()
    }
}

fn with_auto_sign(mut state: WalletConnectionState, offset_hours: i64) -> WalletConnectionState {
    let key = EthSecp256k1Key::generate().unwrap();
    state.auto_sign = Some(AutoSignSession::new(
        USER_INJ,
        &key,
        Utc::now() + Duration::hours(offset_hours),
        3600,
        vec![],
        vec![],
    ));
    state
}

fn with_authz(mut state: WalletConnectionState) -> WalletConnectionState {
    state.authz = AuthzDelegation::for_granter(DEV_INJ).unwrap();
    state
}

#[rstest]
#[case::direct(connected_state(), BroadcastRoute::Direct)]
#[case::authz(with_authz(connected_state()), BroadcastRoute::AuthzExec)]
#[case::auto_sign(with_auto_sign(connected_state(), 0), BroadcastRoute::AutoSign)]
#[case::expired_auto_sign(with_auto_sign(connected_state(), -2), BroadcastRoute::Direct)]
#[case::expired_auto_sign_with_authz(
    with_authz(with_auto_sign(connected_state(), -2)),
    BroadcastRoute::AuthzExec
)]
fn test_route_selection(#[case] state: WalletConnectionState, #[case] expected: BroadcastRoute) {
    let prepared = assert_ok!(prepare_broadcast_messages(
        &state,
        vec![send_msg()],
        Utc::now()
    ));
    assert_eq!(prepared.route, expected);

    let wrapped = prepared.msgs.iter().all(|msg| msg.type_url == MSG_EXEC);
    assert_eq!(wrapped, expected != BroadcastRoute::Direct);
}

#[test]
fn test_conflict_fails_fast() {
    let state = with_authz(with_auto_sign(connected_state(), 0));
    let err = prepare_broadcast_messages(&state, vec![send_msg()], Utc::now()).unwrap_err();
    assert!(matches!(err, WalletError::AutoSignAuthzConflict));
}

#[test]
fn test_exec_keeps_every_message() {
    let state = with_authz(connected_state());
    let prepared = assert_ok!(prepare_broadcast_messages(
        &state,
        vec![send_msg(), send_msg()],
        Utc::now()
    ));

    assert_eq!(prepared.msgs.len(), 1);
    assert_eq!(prepared.msgs[0].value["msgs"].as_array().unwrap().len(), 2);
}
