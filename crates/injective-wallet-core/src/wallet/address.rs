/*
[INPUT]:  Ethereum (0x) and Injective (bech32 inj) addresses
[OUTPUT]: Converted addresses and subaccount ids
[POS]:    Wallet layer - address derivation shared by connect, authz and auto-sign
[UPDATE]: When address formats or subaccount layout change
*/

use bech32::{Bech32, Hrp};

use crate::http::{Result, WalletError};

pub const INJECTIVE_HRP: &str = "inj";

const ADDRESS_BYTES: usize = 20;
const SUBACCOUNT_NONCE_HEX_LEN: usize = 24;

/// `0x...` -> `inj1...`
pub fn get_injective_address(ethereum_address: &str) -> Result<String> {
    let bytes = parse_ethereum_address(ethereum_address)?;
    let hrp = Hrp::parse(INJECTIVE_HRP)
        .map_err(|e| WalletError::invalid_address(ethereum_address, e.to_string()))?;
    bech32::encode::<Bech32>(hrp, &bytes)
        .map_err(|e| WalletError::invalid_address(ethereum_address, e.to_string()))
}

/// `inj1...` -> lowercase `0x...`
pub fn get_ethereum_address(injective_address: &str) -> Result<String> {
    let injective_address = injective_address.trim();
    let (hrp, data) = bech32::decode(injective_address)
        .map_err(|e| WalletError::invalid_address(injective_address, e.to_string()))?;

    if !hrp.as_str().eq_ignore_ascii_case(INJECTIVE_HRP) {
        return Err(WalletError::invalid_address(
            injective_address,
            format!("expected prefix {INJECTIVE_HRP}, got {}", hrp.as_str()),
        ));
    }
    if data.len() != ADDRESS_BYTES {
        return Err(WalletError::invalid_address(
            injective_address,
            format!("expected {ADDRESS_BYTES} bytes, got {}", data.len()),
        ));
    }

    Ok(format!("0x{}", hex::encode(data)))
}

pub fn is_injective_address(address: &str) -> bool {
    get_ethereum_address(address).is_ok()
}

pub fn is_ethereum_address(address: &str) -> bool {
    parse_ethereum_address(address).is_ok()
}

/// Accept either format and return the lowercase `inj` form
pub fn to_injective_address(address: &str) -> Result<String> {
    let address = address.trim();
    if address.starts_with("0x") || address.starts_with("0X") {
        get_injective_address(address)
    } else {
        get_injective_address(&get_ethereum_address(address)?)
    }
}

/// Subaccount with nonce 0
pub fn default_subaccount_id(address: &str) -> Result<String> {
    subaccount_id(address, 0)
}

/// `0x` + 40 hex address chars + 24 hex nonce chars
pub fn subaccount_id(address: &str, nonce: u32) -> Result<String> {
    let injective_address = to_injective_address(address)?;
    let ethereum_address = get_ethereum_address(&injective_address)?;
    Ok(format!(
        "{ethereum_address}{nonce:0width$x}",
        width = SUBACCOUNT_NONCE_HEX_LEN
    ))
}

fn parse_ethereum_address(address: &str) -> Result<[u8; ADDRESS_BYTES]> {
    let trimmed = address.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| WalletError::invalid_address(address, "missing 0x prefix"))?;

    let bytes =
        hex::decode(hex_part).map_err(|e| WalletError::invalid_address(address, e.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| WalletError::invalid_address(address, "expected 20 bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH: &str = "0xaf79152ac5df276d9a8e1e2e22822f9713474902";
    const INJ: &str = "inj14au322k9munkmx5wrchz9q30juf5wjgz2cfqku";

    #[test]
    fn test_eth_to_inj() {
        assert_eq!(get_injective_address(ETH).unwrap(), INJ);
    }

    #[test]
    fn test_inj_to_eth() {
        assert_eq!(get_ethereum_address(INJ).unwrap(), ETH);
    }

    #[test]
    fn test_checksummed_input_is_accepted() {
        let checksummed = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        assert_eq!(
            get_injective_address(checksummed).unwrap(),
            "inj17w0adeg64ky0daxwd2ugyuneellmjgnxf5vkec"
        );
    }

    #[test]
    fn test_uppercase_bech32_is_lowercased() {
        let upper = INJ.to_ascii_uppercase();
        assert_eq!(to_injective_address(&upper).unwrap(), INJ);
        assert_eq!(get_ethereum_address(&upper).unwrap(), ETH);
        assert_eq!(to_injective_address(&format!("  {INJ} ")).unwrap(), INJ);
    }

    #[test]
    fn test_rejects_foreign_prefix_and_bad_hex() {
        assert!(get_ethereum_address("cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqnrql8a").is_err());
        assert!(get_injective_address("0x1234").is_err());
        assert!(get_injective_address("af79152ac5df276d9a8e1e2e22822f9713474902").is_err());
        assert!(!is_injective_address("inj1notanaddress"));
        assert!(is_ethereum_address(ETH));
    }

    #[test]
    fn test_default_subaccount_id() {
        let id = default_subaccount_id(INJ).unwrap();
        assert_eq!(id.len(), 66);
        assert_eq!(id, format!("{ETH}{}", "0".repeat(24)));
        assert_eq!(default_subaccount_id(ETH).unwrap(), id);
    }

    #[test]
    fn test_subaccount_id_with_nonce() {
        let id = subaccount_id(ETH, 26).unwrap();
        assert!(id.ends_with("00000000000000000000001a"));
        assert_eq!(id.len(), 66);
    }
}
