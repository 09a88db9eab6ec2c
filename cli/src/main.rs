// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vaultctl
//!
//! Entry point for the `vaultctl` binary. Parses CLI arguments, initializes
//! logging, and applies one operation to a vault state file.
//!
//! - `init`           — create a vault and write its state file
//! - `show`           — print the current state
//! - `set-*`          — run one guarded setter as `--caller`
//! - `version`        — print build version information
//!
//! A rejected setter exits non-zero and leaves the state file untouched.

mod cli;
mod logging;
mod state;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

use custody_contracts::{GuestListRef, VaultConfig, VaultConfigError, VaultSettings};
use custody_protocol::identity::Address;

use cli::{Commands, VaultCtlCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = VaultCtlCli::parse();

    match cli.command {
        Commands::Version => {
            print_version();
            Ok(())
        }
        command => {
            logging::init_logging(
                "vaultctl=info,custody_contracts=info",
                LogFormat::from_str_lossy(&cli.log_format),
            );
            let config = run(&cli.state, command)?;
            print_state(&config)
        }
    }
}

/// Executes one subcommand against the state file and returns the resulting
/// vault.
fn run(state_path: &Path, command: Commands) -> Result<VaultConfig> {
    match command {
        Commands::Init(args) => init_vault(state_path, args),
        Commands::Show => state::load(state_path),
        Commands::SetRewards(args) => {
            mutate(state_path, |v| v.set_rewards(&args.caller, args.value))
        }
        Commands::SetGuestList(args) => mutate(state_path, |v| {
            v.set_guest_list(&args.caller, args.value.map(GuestListRef::new))
        }),
        Commands::SetGuardian(args) => {
            mutate(state_path, |v| v.set_guardian(&args.caller, args.value))
        }
        Commands::SetMin(args) => mutate(state_path, |v| v.set_min(&args.caller, args.value)),
        Commands::SetGovernance(args) => {
            mutate(state_path, |v| v.set_governance(&args.caller, args.value))
        }
        Commands::Version => bail!("`version` does not operate on a vault"),
    }
}

/// Creates a new vault and writes its state file.
fn init_vault(state_path: &Path, args: cli::InitArgs) -> Result<VaultConfig> {
    if state_path.exists() && !args.force {
        bail!(
            "state file {} already exists (use --force to overwrite)",
            state_path.display()
        );
    }

    let address = match (args.deployer, args.nonce) {
        (Some(deployer), Some(nonce)) => Address::derive(&deployer, nonce),
        _ => Address::random(),
    };

    let settings = VaultSettings {
        address,
        governance: args.governance,
        guardian: args.guardian,
        rewards: args.rewards,
        guest_list: args.guest_list.map(GuestListRef::new),
        min: args.min,
        max: args.max,
    };
    let config = VaultConfig::new(settings)?;
    state::save(state_path, &config)?;

    tracing::info!(
        vault = %config.address(),
        path = %state_path.display(),
        "vault initialized"
    );
    Ok(config)
}

/// Loads the vault, applies `op`, and persists the result only if `op`
/// succeeded.
fn mutate<F>(state_path: &Path, op: F) -> Result<VaultConfig>
where
    F: FnOnce(&mut VaultConfig) -> Result<(), VaultConfigError>,
{
    let mut config = state::load(state_path)?;
    op(&mut config)?;
    state::save(state_path, &config)?;
    Ok(config)
}

fn print_state(config: &VaultConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.snapshot())?);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("vaultctl {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", custody_protocol::config::PROTOCOL_VERSION);
}
