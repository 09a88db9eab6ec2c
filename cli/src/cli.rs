//! # CLI Interface
//!
//! Defines the command-line argument structure for `vaultctl` using `clap`
//! derive. Every setter subcommand names its caller explicitly; the vault
//! decides whether that caller is allowed.

use clap::{Args, Parser, Subcommand};
use custody_protocol::config::{DEFAULT_MAX, DEFAULT_MIN};
use custody_protocol::identity::Address;
use std::path::PathBuf;

/// Operate a custody vault configuration stored in a JSON state file.
#[derive(Parser, Debug)]
#[command(
    name = "vaultctl",
    about = "Custody vault configuration tool",
    version,
    propagate_version = true
)]
pub struct VaultCtlCli {
    /// Path to the vault state file.
    #[arg(
        long,
        short = 's',
        env = "VAULTCTL_STATE",
        default_value = "vault.json",
        global = true
    )]
    pub state: PathBuf,

    /// Log output format: `pretty` or `json`.
    #[arg(long, env = "VAULTCTL_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new vault and write its state file.
    Init(InitArgs),
    /// Print the current vault state as JSON.
    Show,
    /// Set the rewards destination.
    SetRewards(AddressArgs),
    /// Set or clear the guest list.
    SetGuestList(GuestListArgs),
    /// Set the guardian.
    SetGuardian(AddressArgs),
    /// Set the lower bound.
    SetMin(MinArgs),
    /// Hand governance to a new address.
    SetGovernance(AddressArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Governance address: the only identity allowed to change the vault.
    #[arg(long)]
    pub governance: Address,

    /// Guardian address. Must not be zero.
    #[arg(long)]
    pub guardian: Address,

    /// Rewards destination. Defaults to governance.
    #[arg(long)]
    pub rewards: Option<Address>,

    /// Guest list address.
    #[arg(long)]
    pub guest_list: Option<Address>,

    /// Initial lower bound.
    #[arg(long, default_value_t = DEFAULT_MIN)]
    pub min: u64,

    /// Upper bound, fixed for the vault's lifetime.
    #[arg(long, default_value_t = DEFAULT_MAX)]
    pub max: u64,

    /// Deployer address. With `--nonce`, the vault address is derived from
    /// it; otherwise a random vault address is used.
    #[arg(long, requires = "nonce")]
    pub deployer: Option<Address>,

    /// Deployer nonce used for address derivation.
    #[arg(long, requires = "deployer")]
    pub nonce: Option<u64>,

    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for setters taking an address.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Address of the identity making the call.
    #[arg(long, env = "VAULTCTL_CALLER")]
    pub caller: Address,

    /// New value.
    pub value: Address,
}

/// Arguments for the `set-guest-list` subcommand.
#[derive(Args, Debug)]
pub struct GuestListArgs {
    /// Address of the identity making the call.
    #[arg(long, env = "VAULTCTL_CALLER")]
    pub caller: Address,

    /// Guest list address. Omit to clear the guest list.
    pub value: Option<Address>,
}

/// Arguments for the `set-min` subcommand.
#[derive(Args, Debug)]
pub struct MinArgs {
    /// Address of the identity making the call.
    #[arg(long, env = "VAULTCTL_CALLER")]
    pub caller: Address,

    /// New lower bound.
    pub value: u64,
}
