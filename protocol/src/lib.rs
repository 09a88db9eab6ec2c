// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Custody Protocol — Core Library
//!
//! Shared primitives for the custody vault stack. The vault configuration
//! core (in `custody-contracts`) and the `vaultctl` tool both speak in terms
//! of the types defined here.
//!
//! ## Architecture
//!
//! - **identity** — 20-byte addresses, the zero identity, and contract
//!   address derivation.
//! - **config** — Protocol constants and default vault bounds.

pub mod config;
pub mod identity;
