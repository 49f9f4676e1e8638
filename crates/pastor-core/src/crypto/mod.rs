//! Cryptographic operations for Pastor.
//!
//! This module turns a passphrase into the 16-byte key used by the block
//! codec in [`crate::storage::codec`].
//!
//! ## Threat Model
//!
//! We defend against:
//! - Casual disclosure of the database file
//!
//! We do NOT defend against:
//! - Offline brute-force with dedicated hardware (no salt, fixed work factor)
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod key;

pub use key::{derive_key, DerivedKey, KEY_LENGTH};
