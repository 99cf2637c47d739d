//! XRPL Base58Check encoding for classic addresses and family seeds.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// The XRPL Base58 alphabet. Every character a classic address can contain.
pub const ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// Version byte of a classic account address.
const ACCOUNT_ID_VERSION: &[u8] = &[0x00];

/// Version prefix of an Ed25519 family seed (encodes to "sEd...").
const ED25519_SEED_VERSION: &[u8] = &[0x01, 0xE1, 0x4B];

/// Encodes a 20-byte account ID as a classic address ("r...").
pub fn encode_account_id(account_id: &[u8; 20]) -> String {
    base58check(ACCOUNT_ID_VERSION, account_id)
}

/// Encodes 16 bytes of seed entropy as an Ed25519 family seed ("sEd...").
pub fn encode_seed(entropy: &[u8; 16]) -> String {
    base58check(ED25519_SEED_VERSION, entropy)
}

/// Derives the account ID of a 33-byte public key: RIPEMD-160(SHA-256(key)).
pub(crate) fn account_id(public_key: &[u8; 33]) -> [u8; 20] {
    let sha = Sha256::digest(public_key);
    Ripemd160::digest(sha).into()
}

fn base58check(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    // First four bytes of double SHA-256
    let checksum = Sha256::digest(Sha256::digest(&data));
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}
