//! Account address type with `0x` hex prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An Aptos account address, e.g. the registry contract or a parcel owner.
///
/// Addresses are up to 32 bytes of hex. The same account can be written in
/// several ways (`0x0ABC`, `0xabc`, `abc`), so comparisons go through
/// [`AccountAddress::canonical`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for hex account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Maximum number of hex digits (32 bytes).
    pub const MAX_HEX_LEN: usize = 64;

    /// Parse and validate an address. The original spelling is kept.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let digits = s.trim().strip_prefix(Self::PREFIX).unwrap_or(s.trim());
        if digits.is_empty()
            || digits.len() > Self::MAX_HEX_LEN
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s.trim().to_string()))
    }

    /// Return the address as it was written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Normalize any address-like string for comparison.
///
/// Works on unvalidated input (claims may carry anything): trims whitespace,
/// drops a `0x`/`0X` prefix, lowercases and strips leading zeros.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .to_ascii_lowercase();
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{stripped}")
    }
}

/// Whether two address strings denote the same account.
///
/// Strings that are not hex addresses (empty, bare `0x`, stray characters)
/// never denote an account, so they match nothing, not even each other.
pub fn same_account(a: &str, b: &str) -> bool {
    is_hex_address(a) && is_hex_address(b) && normalize(a) == normalize(b)
}

fn is_hex_address(raw: &str) -> bool {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountAddress> for String {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_hex() {
        let addr = AccountAddress::parse("0xA8d9").unwrap();
        assert_eq!(addr.as_str(), "0xA8d9");
        assert_eq!(normalize(addr.as_str()), "0xa8d9");
        assert!(AccountAddress::parse("abc").is_ok());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(AccountAddress::parse("").is_err());
        assert!(AccountAddress::parse("0x").is_err());
        assert!(AccountAddress::parse("0xzz").is_err());
        assert!(AccountAddress::parse(format!("0x{}", "a".repeat(65))).is_err());
    }

    #[test]
    fn normalize_strips_leading_zeros_and_case() {
        assert_eq!(normalize("0x0000ABC"), "0xabc");
        assert_eq!(normalize("  0XAbC "), "0xabc");
        assert_eq!(normalize("0x0"), "0x0");
        assert_eq!(normalize("000"), "0x0");
    }

    #[test]
    fn same_account_compares_canonical_forms() {
        assert!(same_account("0xabc", "0x0ABC"));
        assert!(same_account("abc", "0xabc"));
        assert!(!same_account("0xabc", "0xdef"));
        assert!(same_account("0x0", "0x000"));
    }

    #[test]
    fn same_account_rejects_non_addresses() {
        assert!(!same_account("", "0x0"));
        assert!(!same_account("0x", "0x0"));
        assert!(!same_account("   ", "0"));
        assert!(!same_account("", ""));
        assert!(!same_account("0xzz", "0xzz"));
        assert!(!same_account("0xabc", "0xabc!"));
    }

    #[test]
    fn serde_validates() {
        let addr: AccountAddress = serde_json::from_str("\"0x1\"").unwrap();
        assert_eq!(addr.as_str(), "0x1");
        assert!(serde_json::from_str::<AccountAddress>("\"nope\"").is_err());
    }
}
