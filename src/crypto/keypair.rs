//! XRP Ledger Ed25519 keypair generation.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};

use super::address::{account_id, encode_account_id, encode_seed};

/// Errors produced by a key generator.
#[derive(Debug, thiserror::Error)]
pub enum KeyGenError {
    #[error("Entropy source failed: {0}")]
    Entropy(#[from] rand::Error),
}

/// Something that can produce fresh keypairs.
///
/// Implementations must be safe to call from many worker threads at once.
pub trait KeyGenerator: Send + Sync {
    /// Generates one new keypair.
    fn generate(&self) -> Result<Keypair, KeyGenError>;
}

/// A generated keypair: classic address plus the seed that recreates it.
#[derive(Debug, Clone)]
pub struct Keypair {
    address: String,
    seed: String,
    public_key: [u8; 33],
    private_key: [u8; 32],
}

impl Keypair {
    /// Derives an Ed25519 keypair from 16 bytes of seed entropy.
    ///
    /// Process:
    /// 1. Private key = first 32 bytes of SHA-512(entropy)
    /// 2. Public key = 0xED || Ed25519 verifying key
    /// 3. Account ID = RIPEMD-160(SHA-256(public key))
    pub fn from_entropy(entropy: [u8; 16]) -> Self {
        let hash = Sha512::digest(entropy);
        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&hash[..32]);

        let signing_key = SigningKey::from_bytes(&private_key);
        let mut public_key = [0u8; 33];
        public_key[0] = 0xED;
        public_key[1..].copy_from_slice(signing_key.verifying_key().as_bytes());

        Self {
            address: encode_account_id(&account_id(&public_key)),
            seed: encode_seed(&entropy),
            public_key,
            private_key,
        }
    }

    /// Builds a keypair from an already-encoded address and seed.
    ///
    /// Key material is left zeroed; intended for generators that do not
    /// derive real keys.
    pub fn from_parts(address: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            seed: seed.into(),
            public_key: [0u8; 33],
            private_key: [0u8; 32],
        }
    }

    /// Returns the classic address ("r...").
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the family seed ("sEd...").
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns the public key as upper-case hex ("ED...").
    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key)
    }

    /// Returns the private key as upper-case hex.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(self.private_key)
    }

    /// Splits the keypair into its address and seed.
    pub fn into_parts(self) -> (String, String) {
        (self.address, self.seed)
    }
}

/// Generates Ed25519 keypairs from OS randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Generator;

impl KeyGenerator for Ed25519Generator {
    fn generate(&self) -> Result<Keypair, KeyGenError> {
        let mut entropy = [0u8; 16];
        OsRng.try_fill_bytes(&mut entropy)?;
        Ok(Keypair::from_entropy(entropy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let keypair = Ed25519Generator.generate().unwrap();
        assert!(keypair.address().starts_with('r'));
        assert!(keypair.seed().starts_with("sEd"));
        assert!((25..=35).contains(&keypair.address().len()));
        assert!(keypair.public_key_hex().starts_with("ED"));
        assert_eq!(keypair.public_key_hex().len(), 66);
        assert_eq!(keypair.private_key_hex().len(), 64);
    }

    #[test]
    fn test_deterministic_address() {
        let a = Keypair::from_entropy([7u8; 16]);
        let b = Keypair::from_entropy([7u8; 16]);
        assert_eq!(a.address(), b.address());
        assert_eq!(a.seed(), b.seed());

        let c = Keypair::from_entropy([8u8; 16]);
        assert_ne!(a.address(), c.address());
    }

    #[test]
    fn test_address_alphabet() {
        let keypair = Keypair::from_entropy([42u8; 16]);
        assert!(keypair
            .address()
            .chars()
            .all(|c| super::super::ALPHABET.contains(c)));
    }

    #[test]
    fn test_from_parts() {
        let keypair = Keypair::from_parts("rTest", "sEdTest");
        assert_eq!(keypair.into_parts(), ("rTest".to_string(), "sEdTest".to_string()));
    }
}
