//! # Identity Module
//!
//! Caller and contract identities for the custody protocol. Authorization in
//! the vault core is a plain equality check between the calling [`Address`]
//! and a stored authority, so everything here is about getting addresses
//! in and out of text reliably.
//!
//! - **Address** — 20-byte identity, `0x`-prefixed hex on the wire, with the
//!   all-zero value reserved as the "no address" sentinel.

pub mod address;

pub use address::{Address, AddressError};
