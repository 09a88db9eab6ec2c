//! # Vault Configuration Contract
//!
//! Holds the mutable configuration of a custody vault and decides who may
//! change it. Every field is an independent guarded register:
//!
//! | Field        | Setter           | Argument check          |
//! |--------------|------------------|-------------------------|
//! | `rewards`    | `set_rewards`    | none                    |
//! | `guest_list` | `set_guest_list` | none                    |
//! | `guardian`   | `set_guardian`   | not the zero address    |
//! | `min`        | `set_min`        | `min <= max`            |
//! | `governance` | `set_governance` | not the zero address    |
//!
//! `max` is fixed when the vault is created.
//!
//! ## Security Model
//!
//! - **Single authority**: only the current `governance` address may mutate
//!   anything. The check is a plain equality test against the stored field.
//! - **Argument first, then caller**: every mutator validates its argument
//!   before authorizing the caller, so a bad argument is reported as such
//!   no matter who sends it. Both checks must pass for a write to happen.
//! - **Atomic**: a rejected call leaves every field, history included,
//!   exactly as it was.
//!
//! The revert strings [`ZERO_ADDRESS_REASON`] and [`MIN_ABOVE_MAX_REASON`]
//! are part of the external contract and must not change.

use chrono::{DateTime, Utc};
use custody_protocol::config::{DEFAULT_MAX, DEFAULT_MIN};
use custody_protocol::identity::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guest_list::GuestListRef;

/// Rejection reason for a zero address where one is not allowed.
pub const ZERO_ADDRESS_REASON: &str = "Address cannot be 0x0";

/// Rejection reason for a lower bound above the upper bound.
pub const MIN_ABOVE_MAX_REASON: &str = "min should be <= max";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when creating or mutating a vault configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultConfigError {
    /// The caller is not the vault's governance.
    #[error("unauthorized: {caller} is not governance")]
    Unauthorized {
        /// The address that attempted the mutation.
        caller: Address,
    },

    /// The argument violates a configuration invariant. Displays the
    /// reason string verbatim.
    #[error("{0}")]
    InvalidArgument(&'static str),
}

impl VaultConfigError {
    /// The fixed reason string of an `InvalidArgument` rejection.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            VaultConfigError::InvalidArgument(reason) => Some(*reason),
            VaultConfigError::Unauthorized { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A mutable configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigField {
    /// Destination for protocol rewards.
    Rewards,
    /// Reference to the guest list gating deposits.
    GuestList,
    /// Operational / emergency role.
    Guardian,
    /// Lower bound.
    Min,
    /// The authority itself.
    Governance,
}

impl std::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigField::Rewards => write!(f, "rewards"),
            ConfigField::GuestList => write!(f, "guest_list"),
            ConfigField::Guardian => write!(f, "guardian"),
            ConfigField::Min => write!(f, "min"),
            ConfigField::Governance => write!(f, "governance"),
        }
    }
}

/// One applied configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigChange {
    /// Which field changed.
    pub field: ConfigField,
    /// Value before the change, rendered as text.
    pub previous: String,
    /// Value after the change, rendered as text.
    pub current: String,
    /// The governance address that made the change.
    pub changed_by: Address,
    /// When the change was applied.
    pub at: DateTime<Utc>,
}

fn default_min() -> u64 {
    DEFAULT_MIN
}

fn default_max() -> u64 {
    DEFAULT_MAX
}

/// Parameters a vault is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSettings {
    /// The vault's own address.
    pub address: Address,
    /// The sole mutation authority.
    pub governance: Address,
    /// Initial guardian. Must not be zero.
    pub guardian: Address,
    /// Initial rewards destination. Defaults to `governance` when absent.
    #[serde(default)]
    pub rewards: Option<Address>,
    /// Initial guest list, if any.
    #[serde(default)]
    pub guest_list: Option<GuestListRef>,
    /// Initial lower bound.
    #[serde(default = "default_min")]
    pub min: u64,
    /// Upper bound, fixed for the vault's lifetime.
    #[serde(default = "default_max")]
    pub max: u64,
}

impl VaultSettings {
    /// Settings with default bounds, rewards flowing to governance and no
    /// guest list.
    pub fn new(address: Address, governance: Address, guardian: Address) -> Self {
        Self {
            address,
            governance,
            guardian,
            rewards: None,
            guest_list: None,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

/// Serializable image of a [`VaultConfig`], including its change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    /// The vault's own address.
    pub address: Address,
    /// Current governance.
    pub governance: Address,
    /// Current rewards destination.
    pub rewards: Address,
    /// Current guardian.
    pub guardian: Address,
    /// Current guest list, if any.
    pub guest_list: Option<GuestListRef>,
    /// Current lower bound.
    pub min: u64,
    /// Upper bound.
    pub max: u64,
    /// Applied changes, oldest first.
    #[serde(default)]
    pub history: Vec<ConfigChange>,
}

// ---------------------------------------------------------------------------
// VaultConfig
// ---------------------------------------------------------------------------

/// The permissioned configuration of one vault.
///
/// Reads are unrestricted. Writes go through the guarded setters, each of
/// which takes the caller's address explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    address: Address,
    governance: Address,
    rewards: Address,
    guardian: Address,
    guest_list: Option<GuestListRef>,
    min: u64,
    max: u64,
    history: Vec<ConfigChange>,
}

impl VaultConfig {
    /// Creates a vault configuration from its initial settings.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::InvalidArgument`] with
    /// [`ZERO_ADDRESS_REASON`] if governance or guardian is zero, or with
    /// [`MIN_ABOVE_MAX_REASON`] if `min > max`.
    pub fn new(settings: VaultSettings) -> Result<Self, VaultConfigError> {
        check_invariants(&settings.governance, &settings.guardian, settings.min, settings.max)?;

        let config = Self {
            address: settings.address,
            governance: settings.governance,
            rewards: settings.rewards.unwrap_or(settings.governance),
            guardian: settings.guardian,
            guest_list: settings.guest_list,
            min: settings.min,
            max: settings.max,
            history: Vec::new(),
        };

        tracing::info!(
            vault = %config.address,
            governance = %config.governance,
            guardian = %config.guardian,
            min = config.min,
            max = config.max,
            "vault configuration created"
        );

        Ok(config)
    }

    /// Rebuilds a live configuration from a snapshot.
    ///
    /// Snapshots usually come from disk, so every invariant is checked again
    /// with the same reasons as [`new`](Self::new).
    pub fn restore(snapshot: VaultSnapshot) -> Result<Self, VaultConfigError> {
        check_invariants(&snapshot.governance, &snapshot.guardian, snapshot.min, snapshot.max)?;

        Ok(Self {
            address: snapshot.address,
            governance: snapshot.governance,
            rewards: snapshot.rewards,
            guardian: snapshot.guardian,
            guest_list: snapshot.guest_list,
            min: snapshot.min,
            max: snapshot.max,
            history: snapshot.history,
        })
    }

    /// Captures the current state, history included.
    pub fn snapshot(&self) -> VaultSnapshot {
        VaultSnapshot {
            address: self.address,
            governance: self.governance,
            rewards: self.rewards,
            guardian: self.guardian,
            guest_list: self.guest_list,
            min: self.min,
            max: self.max,
            history: self.history.clone(),
        }
    }

    // -- mutators ------------------------------------------------------------

    /// Sets the rewards destination. Any address is accepted, including the
    /// vault's own.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::Unauthorized`] if `caller` is not governance.
    pub fn set_rewards(
        &mut self,
        caller: &Address,
        new_rewards: Address,
    ) -> Result<(), VaultConfigError> {
        self.ensure_governance(caller, ConfigField::Rewards)?;

        let previous = std::mem::replace(&mut self.rewards, new_rewards);
        self.record(
            ConfigField::Rewards,
            caller,
            previous.to_string(),
            new_rewards.to_string(),
        );
        Ok(())
    }

    /// Sets or clears the guest list reference. The reference is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::Unauthorized`] if `caller` is not governance.
    pub fn set_guest_list(
        &mut self,
        caller: &Address,
        new_list: Option<GuestListRef>,
    ) -> Result<(), VaultConfigError> {
        self.ensure_governance(caller, ConfigField::GuestList)?;

        let previous = std::mem::replace(&mut self.guest_list, new_list);
        self.record(
            ConfigField::GuestList,
            caller,
            render_guest_list(previous),
            render_guest_list(new_list),
        );
        Ok(())
    }

    /// Sets the guardian.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::InvalidArgument`] with
    /// [`ZERO_ADDRESS_REASON`] for the zero address, whoever the caller is.
    /// Returns [`VaultConfigError::Unauthorized`] if `caller` is not governance.
    pub fn set_guardian(
        &mut self,
        caller: &Address,
        new_guardian: Address,
    ) -> Result<(), VaultConfigError> {
        ensure_non_zero(&new_guardian)
            .map_err(|e| rejected(ConfigField::Guardian, caller, e))?;
        self.ensure_governance(caller, ConfigField::Guardian)?;

        let previous = std::mem::replace(&mut self.guardian, new_guardian);
        self.record(
            ConfigField::Guardian,
            caller,
            previous.to_string(),
            new_guardian.to_string(),
        );
        Ok(())
    }

    /// Sets the lower bound. `new_min == max` is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::InvalidArgument`] with
    /// [`MIN_ABOVE_MAX_REASON`] if `new_min > max`, whoever the caller is.
    /// Returns [`VaultConfigError::Unauthorized`] if `caller` is not governance.
    pub fn set_min(&mut self, caller: &Address, new_min: u64) -> Result<(), VaultConfigError> {
        ensure_within_max(new_min, self.max).map_err(|e| rejected(ConfigField::Min, caller, e))?;
        self.ensure_governance(caller, ConfigField::Min)?;

        let previous = std::mem::replace(&mut self.min, new_min);
        self.record(
            ConfigField::Min,
            caller,
            previous.to_string(),
            new_min.to_string(),
        );
        Ok(())
    }

    /// Hands governance to a new address. The old governance loses all
    /// authority as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns [`VaultConfigError::InvalidArgument`] with
    /// [`ZERO_ADDRESS_REASON`] for the zero address, whoever the caller is.
    /// Returns [`VaultConfigError::Unauthorized`] if `caller` is not governance.
    pub fn set_governance(
        &mut self,
        caller: &Address,
        new_governance: Address,
    ) -> Result<(), VaultConfigError> {
        ensure_non_zero(&new_governance)
            .map_err(|e| rejected(ConfigField::Governance, caller, e))?;
        self.ensure_governance(caller, ConfigField::Governance)?;

        let previous = std::mem::replace(&mut self.governance, new_governance);
        self.record(
            ConfigField::Governance,
            caller,
            previous.to_string(),
            new_governance.to_string(),
        );
        Ok(())
    }

    // -- accessors -----------------------------------------------------------

    /// The vault's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The current governance.
    pub fn governance(&self) -> Address {
        self.governance
    }

    /// The current rewards destination.
    pub fn rewards(&self) -> Address {
        self.rewards
    }

    /// The current guardian. Never zero.
    pub fn guardian(&self) -> Address {
        self.guardian
    }

    /// The current guest list, if one is set.
    pub fn guest_list(&self) -> Option<GuestListRef> {
        self.guest_list
    }

    /// The current lower bound.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// The upper bound.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Applied changes, oldest first.
    pub fn history(&self) -> &[ConfigChange] {
        &self.history
    }

    // -- internals -----------------------------------------------------------

    fn ensure_governance(
        &self,
        caller: &Address,
        field: ConfigField,
    ) -> Result<(), VaultConfigError> {
        if *caller != self.governance {
            return Err(rejected(
                field,
                caller,
                VaultConfigError::Unauthorized { caller: *caller },
            ));
        }
        Ok(())
    }

    /// Appends to the history. Writes that leave the value unchanged are not
    /// recorded, which keeps repeated identical calls idempotent.
    fn record(&mut self, field: ConfigField, caller: &Address, previous: String, current: String) {
        if previous == current {
            tracing::debug!(vault = %self.address, %field, value = %current, "config unchanged");
            return;
        }

        tracing::info!(
            vault = %self.address,
            %field,
            caller = %caller,
            previous = %previous,
            current = %current,
            "config changed"
        );

        self.history.push(ConfigChange {
            field,
            previous,
            current,
            changed_by: *caller,
            at: Utc::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

fn ensure_non_zero(address: &Address) -> Result<(), VaultConfigError> {
    if address.is_zero() {
        return Err(VaultConfigError::InvalidArgument(ZERO_ADDRESS_REASON));
    }
    Ok(())
}

fn ensure_within_max(min: u64, max: u64) -> Result<(), VaultConfigError> {
    if min > max {
        return Err(VaultConfigError::InvalidArgument(MIN_ABOVE_MAX_REASON));
    }
    Ok(())
}

fn check_invariants(
    governance: &Address,
    guardian: &Address,
    min: u64,
    max: u64,
) -> Result<(), VaultConfigError> {
    ensure_non_zero(governance)?;
    ensure_non_zero(guardian)?;
    ensure_within_max(min, max)
}

fn rejected(field: ConfigField, caller: &Address, err: VaultConfigError) -> VaultConfigError {
    tracing::warn!(%field, caller = %caller, error = %err, "config change rejected");
    err
}

fn render_guest_list(list: Option<GuestListRef>) -> String {
    match list {
        Some(list) => list.to_string(),
        None => "none".to_string(),
    }
}
