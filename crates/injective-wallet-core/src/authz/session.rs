/*
[INPUT]:  Ephemeral key, granted permissions and expiration
[OUTPUT]: Auto-sign session record and its usability checks
[POS]:    AuthZ layer - ephemeral signing session lifecycle data
[UPDATE]: When session fields or expiry rules change
*/

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::authz::ContractExecutionCompatGrant;
use crate::http::Result;
use crate::wallet::EthSecp256k1Key;

/// Time-limited permission for a locally held key to sign on the user's behalf
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSignSession {
    /// The user's real injective address that granted the permissions
    pub granter: String,
    /// Ephemeral key's injective address (the grantee)
    pub injective_address: String,
    pub private_key_hex: String,
    pub expiration: DateTime<Utc>,
    pub duration_seconds: u64,
    #[serde(default)]
    pub message_types: Vec<String>,
    #[serde(default)]
    pub contract_execution_compat: Vec<ContractExecutionCompatGrant>,
}

impl AutoSignSession {
    pub fn new(
        granter: &str,
        key: &EthSecp256k1Key,
        now: DateTime<Utc>,
        duration_seconds: u64,
        message_types: Vec<String>,
        contract_execution_compat: Vec<ContractExecutionCompatGrant>,
    ) -> Self {
        Self {
            granter: granter.to_string(),
            injective_address: key.injective_address().to_string(),
            private_key_hex: key.private_key_hex(),
            expiration: expiration_from(now, duration_seconds),
            duration_seconds,
            message_types,
            contract_execution_compat,
        }
    }

    /// Usable only while unexpired and holding both address and key
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
            && !self.injective_address.is_empty()
            && !self.private_key_hex.is_empty()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    /// Same key and permissions, new window starting at `now`
    pub fn renewed(&self, now: DateTime<Utc>) -> Self {
        Self {
            expiration: expiration_from(now, self.duration_seconds),
            ..self.clone()
        }
    }

    /// Rebuild the ephemeral key
    pub fn key(&self) -> Result<EthSecp256k1Key> {
        EthSecp256k1Key::from_private_key_hex(&self.private_key_hex)
    }
}

fn expiration_from(now: DateTime<Utc>, duration_seconds: u64) -> DateTime<Utc> {
    i64::try_from(duration_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|window| now.checked_add_signed(window))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl fmt::Debug for AutoSignSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoSignSession")
            .field("granter", &self.granter)
            .field("injective_address", &self.injective_address)
            .field("expiration", &self.expiration)
            .field("duration_seconds", &self.duration_seconds)
            .field("message_types", &self.message_types.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRANTER: &str = "inj14au322k9munkmx5wrchz9q30juf5wjgz2cfqku";

    fn session(now: DateTime<Utc>) -> AutoSignSession {
        let key = EthSecp256k1Key::generate().unwrap();
        AutoSignSession::new(GRANTER, &key, now, 3600, vec![], vec![])
    }

    #[test]
    fn test_new_session_is_usable() {
        let now = Utc::now();
        let session = session(now);
        assert!(session.is_usable_at(now));
        assert_eq!(session.expiration, now + Duration::seconds(3600));
    }

    #[test]
    fn test_session_unusable_at_expiration() {
        let now = Utc::now();
        let session = session(now);
        assert!(!session.is_usable_at(session.expiration));
        assert!(session.is_expired_at(session.expiration));
    }

    #[test]
    fn test_session_requires_key_and_address() {
        let now = Utc::now();
        let mut missing_key = session(now);
        missing_key.private_key_hex.clear();
        assert!(!missing_key.is_usable_at(now));

        let mut missing_address = session(now);
        missing_address.injective_address.clear();
        assert!(!missing_address.is_usable_at(now));
    }

    #[test]
    fn test_renewed_keeps_key_and_extends_window() {
        let start = Utc::now() - Duration::hours(2);
        let expired = session(start);
        let now = Utc::now();
        assert!(expired.is_expired_at(now));

        let renewed = expired.renewed(now);
        assert!(renewed.is_usable_at(now));
        assert_eq!(renewed.private_key_hex, expired.private_key_hex);
        assert_eq!(renewed.key().unwrap().injective_address(), expired.injective_address);
    }

    #[test]
    fn test_debug_hides_private_key() {
        let session = session(Utc::now());
        assert!(!format!("{session:?}").contains(&session.private_key_hex));
    }
}
