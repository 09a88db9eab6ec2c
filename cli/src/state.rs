//! # State File
//!
//! A vault lives on disk as the pretty-printed JSON of its
//! [`VaultSnapshot`]. Loading re-validates every invariant, so a hand-edited
//! file with a zero guardian or `min > max` is refused instead of silently
//! becoming the new truth. Saving writes a sibling temp file and renames it
//! over the original so a crash never leaves a half-written state.

use anyhow::{Context, Result};
use custody_contracts::{VaultConfig, VaultSnapshot};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and validates the vault stored at `path`.
pub fn load(path: &Path) -> Result<VaultConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read vault state from {}", path.display()))?;
    let snapshot: VaultSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("malformed vault state in {}", path.display()))?;
    let config = VaultConfig::restore(snapshot)
        .with_context(|| format!("vault state in {} violates vault invariants", path.display()))?;

    tracing::debug!(path = %path.display(), vault = %config.address(), "vault state loaded");
    Ok(config)
}

/// Atomically replaces the state file at `path` with `config`.
pub fn save(path: &Path, config: &VaultConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(&config.snapshot())
        .context("failed to serialize vault state")?;

    let tmp = temp_path(path);
    fs::write(&tmp, json)
        .with_context(|| format!("failed to write vault state to {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move vault state into {}", path.display()))?;

    tracing::debug!(path = %path.display(), "vault state saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
