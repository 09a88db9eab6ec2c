//! # Protocol Configuration & Constants
//!
//! Every magic number shared between the vault core and its tooling lives
//! here. Vault parameters that differ per deployment are carried by
//! `VaultSettings` in the contracts crate; these are the defaults.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Major version. Bump when the snapshot format changes incompatibly.
pub const PROTOCOL_VERSION_MAJOR: u16 = 0;

/// Minor version. Bump on backward-compatible additions.
pub const PROTOCOL_VERSION_MINOR: u16 = 1;

/// Patch version.
pub const PROTOCOL_VERSION_PATCH: u16 = 0;

/// The full version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Vault Bounds
// ---------------------------------------------------------------------------

/// Default upper bound, in basis points. Fixed for the lifetime of a vault.
pub const DEFAULT_MAX: u64 = 10_000;

/// Default lower bound, in basis points: 95% of the vault balance is kept
/// available, the rest may be put to work elsewhere.
pub const DEFAULT_MIN: u64 = 9_500;
