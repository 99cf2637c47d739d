//! Cryptographic operations for XRP Ledger key and address generation.
//!
//! This module provides:
//! - Ed25519 keypair derivation from 16-byte seed entropy
//! - Classic address and family seed encoding (XRPL Base58Check)
//! - The `KeyGenerator` seam used by the workers

mod address;
mod keypair;

pub use address::{encode_account_id, encode_seed, ALPHABET};
pub use keypair::{Ed25519Generator, KeyGenError, KeyGenerator, Keypair};
