//! # Pastor Core
//!
//! Core library for Pastor - a local, single-user encrypted password store.
//!
//! This crate provides the key derivation, the on-disk codec, the sorted
//! record store and the password generator, independent of the CLI.
//!
//! ## Architecture
//!
//! - **crypto**: Passphrase to key stretching
//! - **storage**: Block codec and the sorted `domain password` record store
//! - **generator**: Password synthesis under character-class constraints
//! - **domain**: URL to bare hostname normalization

pub mod crypto;
pub mod domain;
pub mod error;
pub mod fs;
pub mod generator;
pub mod storage;

pub use crypto::{derive_key, DerivedKey};
pub use domain::normalize_domain;
pub use error::{PastorError, Result};
pub use generator::{generate, ClassCounts, GeneratorOptions};
pub use storage::{Database, MergeOutcome, OverwritePolicy};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
