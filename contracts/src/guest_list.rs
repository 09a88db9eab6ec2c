//! # Guest List Reference
//!
//! A guest list is an external component that decides which depositors a
//! vault admits. The vault never calls into it from the configuration core;
//! it only remembers which one is in force. The reference is stored exactly
//! as governance hands it over, with no shape or liveness checks.

use custody_protocol::identity::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a deployed guest list, identified by its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestListRef(Address);

impl GuestListRef {
    /// Wraps the address of a deployed guest list.
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// The guest list's address.
    pub fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for GuestListRef {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for GuestListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_serializes_as_bare_address() {
        let addr = Address::from_bytes([0xab; 20]);
        let list = GuestListRef::new(addr);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        assert_eq!(list.to_string(), addr.to_string());
    }

    #[test]
    fn zero_reference_is_kept_verbatim() {
        let list = GuestListRef::from(Address::ZERO);
        assert_eq!(list.address(), Address::ZERO);
    }
}
