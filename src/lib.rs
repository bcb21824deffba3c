//! nfd-lookup - Algorand address codecs and NFD registry lookup escrows
//!
//! # Architecture
//!
//! ## Codecs
//! - [`address`] - 58-character checksummed account addresses
//! - [`txid`] - base32 transaction identifiers
//! - [`varint`] - unsigned LEB128 lengths
//!
//! ## Registry Lookups
//! - [`logicsig`] - lookup LogicSig template and escrow addresses
//! - [`crypto`] - SHA-512/256 hashing
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - `cli` - CLI helpers (feature `cli`)
//!
//! Foreign-function exports (plugin loader and Postgres) live in the
//! `nfd-lookup-ffi` crate of this workspace.

#![forbid(unsafe_code)]

// ============================================================================
// Codecs
// ============================================================================
pub mod address;
pub mod txid;
pub mod varint;

// ============================================================================
// Registry Lookups
// ============================================================================
pub mod crypto;
pub mod logicsig;

// ============================================================================
// Configuration & Utilities
// ============================================================================
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;

pub use address::{address_bin_to_txt, address_txt_to_bin, Address};
pub use error::{LookupError, Result};
pub use logicsig::{
    name_lookup_address, reverse_address_bin_lookup_address, reverse_address_lookup_address,
    LookupKind, LookupLogicSig,
};
pub use txid::{txid_bin_to_txt, txid_txt_to_bin, TxId};
