//! Integration tests for the vault configuration contract.
//!
//! Each test deploys a fresh vault with its own governance, deployer and a
//! random outsider, then walks through the permissioned setters the way an
//! operator would: governance succeeds, everyone else is turned away, and
//! bad arguments are rejected with their fixed reason strings.

use custody_contracts::{
    ConfigField, GuestListRef, VaultConfig, VaultConfigError, VaultSettings,
    MIN_ABOVE_MAX_REASON, ZERO_ADDRESS_REASON,
};
use custody_protocol::identity::Address;

/// The actors every test needs.
struct Fixture {
    deployer: Address,
    governance: Address,
    rando: Address,
    vault: VaultConfig,
}

/// Helper: deploys a vault at the address derived from `deployer`.
fn deployed_vault() -> Fixture {
    let deployer = Address::random();
    let governance = Address::random();
    let rando = Address::random();
    let settings = VaultSettings::new(Address::derive(&deployer, 0), governance, deployer);
    let vault = VaultConfig::new(settings).expect("valid settings");
    Fixture {
        deployer,
        governance,
        rando,
        vault,
    }
}

// ---------------------------------------------------------------------------
// Permissioned Setters
// ---------------------------------------------------------------------------

#[test]
fn set_rewards_to_vault_itself() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    let own = vault.address();
    vault.set_rewards(&governance, own).unwrap();
    assert_eq!(vault.rewards(), own);

    let err = vault.set_rewards(&rando, own).unwrap_err();
    assert!(matches!(err, VaultConfigError::Unauthorized { caller } if caller == rando));
    assert_eq!(vault.rewards(), own);
}

#[test]
fn set_guest_list_by_governance_only() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    let guestlist = GuestListRef::new(Address::derive(&governance, 7));
    vault.set_guest_list(&governance, Some(guestlist)).unwrap();
    assert_eq!(vault.guest_list(), Some(guestlist));
    assert_eq!(
        vault.guest_list().map(|g| g.address()),
        Some(guestlist.address())
    );

    let err = vault.set_guest_list(&rando, Some(guestlist)).unwrap_err();
    assert!(matches!(err, VaultConfigError::Unauthorized { .. }));
}

#[test]
fn set_guardian_rejects_zero_then_accepts_rando() {
    let Fixture {
        deployer,
        governance,
        rando,
        mut vault,
    } = deployed_vault();

    let before = vault.guardian();
    let err = vault.set_guardian(&governance, Address::ZERO).unwrap_err();
    assert_eq!(err.to_string(), "Address cannot be 0x0");
    assert_eq!(vault.guardian(), before);

    vault.set_guardian(&governance, rando).unwrap();
    assert_eq!(vault.guardian(), rando);

    // The deployer holds no special rights once the vault exists.
    let err = vault.set_rewards(&deployer, rando).unwrap_err();
    assert!(matches!(err, VaultConfigError::Unauthorized { .. }));
    let err = vault.set_guardian(&deployer, governance).unwrap_err();
    assert!(matches!(err, VaultConfigError::Unauthorized { .. }));
    assert_eq!(vault.guardian(), rando);
}

#[test]
fn set_min_bounded_by_max() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    let before = vault.min();
    let err = vault.set_min(&governance, vault.max() + 1_000).unwrap_err();
    assert_eq!(err.to_string(), "min should be <= max");
    assert_eq!(err.reason(), Some(MIN_ABOVE_MAX_REASON));
    assert_eq!(vault.min(), before);

    vault.set_min(&governance, 1_000).unwrap();
    assert_eq!(vault.min(), 1_000);

    let err = vault.set_min(&rando, 1_000).unwrap_err();
    assert!(matches!(err, VaultConfigError::Unauthorized { .. }));
    assert_eq!(vault.min(), 1_000);
}

#[test]
fn set_min_at_boundary() {
    let Fixture {
        governance,
        mut vault,
        ..
    } = deployed_vault();

    let max = vault.max();
    vault.set_min(&governance, max).unwrap();
    assert_eq!(vault.min(), max);
    vault.set_min(&governance, 0).unwrap();
    assert_eq!(vault.min(), 0);
}

// ---------------------------------------------------------------------------
// Governance Rotation
// ---------------------------------------------------------------------------

#[test]
fn rotated_governance_takes_over() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    let successor = Address::random();
    vault.set_governance(&governance, successor).unwrap();

    assert!(vault.set_rewards(&governance, rando).is_err());
    vault.set_rewards(&successor, rando).unwrap();
    assert_eq!(vault.rewards(), rando);

    let err = vault.set_governance(&successor, Address::ZERO).unwrap_err();
    assert_eq!(err.reason(), Some(ZERO_ADDRESS_REASON));
    assert_eq!(vault.governance(), successor);
}

// ---------------------------------------------------------------------------
// History & Persistence
// ---------------------------------------------------------------------------

#[test]
fn history_tracks_each_applied_change() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    vault.set_guardian(&governance, rando).unwrap();
    vault.set_min(&governance, 5_000).unwrap();
    let _ = vault.set_min(&rando, 6_000);
    let _ = vault.set_guardian(&governance, Address::ZERO);

    let fields: Vec<ConfigField> = vault.history().iter().map(|c| c.field).collect();
    assert_eq!(fields, vec![ConfigField::Guardian, ConfigField::Min]);
    assert!(vault.history().iter().all(|c| c.changed_by == governance));
    assert!(vault.history()[0].at <= vault.history()[1].at);
}

#[test]
fn snapshot_survives_json_round_trip() {
    let Fixture {
        governance,
        rando,
        mut vault,
        ..
    } = deployed_vault();

    vault.set_guardian(&governance, rando).unwrap();
    vault.set_min(&governance, 1_234).unwrap();

    let json = serde_json::to_string_pretty(&vault.snapshot()).unwrap();
    let restored = VaultConfig::restore(serde_json::from_str(&json).unwrap()).unwrap();
    assert_eq!(restored, vault);
    assert_eq!(restored.history().len(), 2);
}
