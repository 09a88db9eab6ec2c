//! # Addresses — Caller and Contract Identities
//!
//! Every actor that touches a vault (governance, guardian, rewards sink, the
//! vault itself, a guest list) is identified by a 20-byte [`Address`]. The
//! all-zero address is the sentinel "nobody" value and several fields refuse
//! to hold it.
//!
//! ```text
//! 0x + 40 lowercase hex digits      e.g. 0x5aeda56215b167893e80b4fe645ba6d5bab767de
//! ```
//!
//! Contract identities are derived rather than generated:
//!
//! ```text
//! BLAKE3(deployer (20 bytes) || nonce (u64, big-endian)) -> 32 bytes
//!     -> last 20 bytes -> contract address
//! ```

use crate::config::ADDRESS_LENGTH;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input contained characters that are not hexadecimal digits.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded address has the wrong number of bytes.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes actually decoded.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte identity.
///
/// # Examples
///
/// ```
/// use custody_protocol::identity::Address;
///
/// let addr: Address = "0x5AEDA56215b167893e80B4fE645BA6d5Bab767DE".parse().unwrap();
/// assert_eq!(addr.to_string(), "0x5aeda56215b167893e80b4fe645ba6d5bab767de");
/// assert!(!addr.is_zero());
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The zero identity, `0x0000000000000000000000000000000000000000`.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Wraps raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns `true` for the zero identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Generates a fresh random address from the thread-local CSPRNG.
    ///
    /// The result is never the zero identity.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; ADDRESS_LENGTH];
            rng.fill_bytes(&mut bytes);
            let addr = Self(bytes);
            if !addr.is_zero() {
                return addr;
            }
        }
    }

    /// Derives the address of a contract created by `deployer` at `nonce`.
    ///
    /// Deterministic: the same pair always yields the same address, and
    /// distinct nonces yield distinct addresses with overwhelming probability.
    pub fn derive(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&deployer.0);
        hasher.update(&nonce.to_be_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest.as_bytes()[32 - ADDRESS_LENGTH..]);
        Self(bytes)
    }

    /// Lowercase hex without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses an address from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let bytes = hex::decode(digits).map_err(|_| AddressError::InvalidHex(s.to_string()))?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                got: bytes.len(),
            });
        }

        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_formats_as_forty_zeros() {
        assert_eq!(
            Address::ZERO.to_string(),
            "0x0000000000000000000000000000000000000000"
        );
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::default(), Address::ZERO);
    }

    #[test]
    fn parse_accepts_prefix_and_mixed_case() {
        let a: Address = "0xABCDEF0123456789abcdef0123456789ABCDEF01".parse().unwrap();
        let b: Address = "abcdef0123456789abcdef0123456789abcdef01".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = Address::from_hex("0x1234").unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                got: 2
            }
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = Address::from_hex("0xzz00000000000000000000000000000000000000").unwrap_err();
        assert!(matches!(err, AddressError::InvalidHex(_)));
    }

    #[test]
    fn random_addresses_differ() {
        let a = Address::random();
        let b = Address::random();
        assert_ne!(a, b);
        assert!(!a.is_zero());
    }

    #[test]
    fn derive_is_deterministic_per_nonce() {
        let deployer = Address::from_bytes([7u8; ADDRESS_LENGTH]);
        assert_eq!(Address::derive(&deployer, 1), Address::derive(&deployer, 1));
        assert_ne!(Address::derive(&deployer, 1), Address::derive(&deployer, 2));
        assert_ne!(Address::derive(&deployer, 1), deployer);
    }

    #[test]
    fn serde_uses_text_form() {
        let addr = Address::from_bytes([0x11; ADDRESS_LENGTH]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x1111111111111111111111111111111111111111\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn serde_rejects_malformed_text() {
        let result: Result<Address, _> = serde_json::from_str("\"0xnope\"");
        assert!(result.is_err());
    }
}
