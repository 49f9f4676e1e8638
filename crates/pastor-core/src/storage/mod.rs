//! Storage layer for Pastor.
//!
//! The database is a single file of independently encrypted blocks
//! ([`codec`]) which decrypts to a sorted list of `domain password` lines
//! ([`database`]).
//!
//! ## Security
//!
//! - The decrypted plaintext only ever lives in memory and is zeroized on drop
//! - Saving rewrites the whole file through a temp file and a rename
//! - A wrong key and a corrupt file are reported identically

pub mod codec;
pub mod database;
pub mod traits;
pub mod types;

// Re-export public types
pub use database::Database;
pub use traits::{Force, KeepExisting, OverwritePolicy};
pub use types::{MergeOutcome, Record};
