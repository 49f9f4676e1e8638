//! Independent-block codec for the database file.
//!
//! Plaintext is cut into 16-byte blocks and each block is enciphered with
//! AES-128 on its own: no chaining, no IV. The final block is zero-padded,
//! and on the way back every block is cut at its first zero byte.
//!
//! Two properties follow and are kept as-is:
//! - content containing a zero byte is truncated at that byte within its block
//! - equal plaintext blocks produce equal ciphertext blocks
//!
//! The database format is line-oriented text, so neither matters for what
//! Pastor stores.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Block};

use crate::crypto::DerivedKey;
use crate::error::{PastorError, Result};

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Build the key schedule. It holds the raw key as round key 0 and is wiped
/// on drop (the `aes` crate's `zeroize` feature).
fn cipher(key: &DerivedKey) -> Result<Aes128> {
    Aes128::new_from_slice(key.as_bytes())
        .map_err(|e| PastorError::Crypto(format!("Failed to initialize cipher: {}", e)))
}

/// Encrypt a plaintext stream.
///
/// Empty input produces empty output.
///
/// # Examples
///
/// ```
/// use pastor_core::crypto::derive_key;
/// use pastor_core::storage::codec::{decrypt, encrypt};
///
/// let key = derive_key(b"passphrase");
/// let encrypted = encrypt(b"pastor 42\n", &key).unwrap();
/// assert_eq!(encrypted.len(), 16);
/// assert_eq!(decrypt(&encrypted, &key).unwrap(), b"pastor 42\n");
/// ```
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = cipher(key)?;
    let mut out = Vec::with_capacity(plaintext.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE);

    for chunk in plaintext.chunks(BLOCK_SIZE) {
        let mut block = Block::default();
        block[..chunk.len()].copy_from_slice(chunk);
        cipher.encrypt_block(&mut block);
        out.extend_from_slice(&block);
    }

    Ok(out)
}

/// Decrypt a ciphertext stream.
///
/// # Errors
///
/// Returns `PastorError::WrongKeyOrCorrupt` if the ciphertext is not a
/// whole number of blocks.
pub fn decrypt(ciphertext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(PastorError::WrongKeyOrCorrupt);
    }

    let cipher = cipher(key)?;
    let mut out = Vec::with_capacity(ciphertext.len());

    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut block = Block::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        let content = block
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(BLOCK_SIZE);
        out.extend_from_slice(&block[..content]);
    }

    Ok(out)
}
