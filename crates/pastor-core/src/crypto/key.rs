//! Key derivation by iterated hashing.
//!
//! The passphrase is fitted into a 16-byte buffer which is then hashed in
//! place a fixed number of times. This stretches the passphrase enough to
//! slow down casual guessing while staying fast for interactive unlocks.
//! It is not a hardened KDF: there is no salt and no tunable work factor.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the derived key in bytes (128 bits, one AES-128 key).
pub const KEY_LENGTH: usize = 16;

/// Number of in-place hash rounds applied to the passphrase buffer.
const HASH_ROUNDS: usize = 1000;

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher setup.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from a passphrase.
///
/// Bytes past the 16th are ignored; shorter passphrases are zero-padded.
/// Every round hashes the whole buffer with SHA-256 and keeps the first
/// 16 bytes of the digest as the next buffer.
///
/// This never fails. A wrong passphrase simply yields a key that will not
/// pass the database header check.
///
/// # Examples
///
/// ```
/// use pastor_core::crypto::derive_key;
///
/// let key = derive_key(b"my-passphrase");
/// assert_eq!(key.as_bytes().len(), 16);
/// ```
pub fn derive_key(passphrase: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LENGTH];
    let len = passphrase.len().min(KEY_LENGTH);
    key[..len].copy_from_slice(&passphrase[..len]);

    for _ in 0..HASH_ROUNDS {
        let mut digest = Sha256::digest(key);
        key.copy_from_slice(&digest[..KEY_LENGTH]);
        digest.as_mut_slice().zeroize();
    }

    DerivedKey { key }
}
