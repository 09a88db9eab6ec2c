//! # Custody Vault Contracts
//!
//! The configuration core of a custody vault: who may change the vault's
//! settings, and which values those settings may take.
//!
//! - **Vault Config** — governance-gated setters for the rewards
//!   destination, guest list, guardian, lower bound and governance itself,
//!   with zero-address and `min <= max` checks.
//! - **Guest List** — the opaque reference type a vault stores for its
//!   external deposit gate.
//!
//! ## Design Principles
//!
//! 1. One authority. Every write compares the caller against the stored
//!    governance address; nothing else grants write access.
//! 2. Check, then set. A rejected call never leaves a partial write behind.
//! 3. Rejections are typed: "not allowed" and "bad input" are different
//!    variants, and bad-input reasons are fixed strings callers can match.
//! 4. Every public type is serializable (serde) so a vault can be persisted
//!    and restored.

pub mod guest_list;
pub mod vault_config;

pub use guest_list::GuestListRef;
pub use vault_config::{
    ConfigChange, ConfigField, VaultConfig, VaultConfigError, VaultSettings, VaultSnapshot,
    MIN_ABOVE_MAX_REASON, ZERO_ADDRESS_REASON,
};
