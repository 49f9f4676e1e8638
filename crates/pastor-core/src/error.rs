//! Error types for Pastor core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing hints.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Pastor operations.
pub type Result<T> = std::result::Result<T, PastorError>;

/// Core error type for Pastor operations.
#[derive(Debug, Error)]
pub enum PastorError {
    /// Contradictory password generation requirements
    #[error("Conflicting requirements: {0}")]
    ConfigConflict(String),

    /// Database file could not be opened for reading
    #[error("Database does not exist: {}", .0.display())]
    DatabaseMissing(PathBuf),

    /// Header check failed after decryption.
    ///
    /// A wrong key and a damaged file look the same from here, so the
    /// message must not claim either.
    #[error("Wrong key for the database, or the database is corrupt")]
    WrongKeyOrCorrupt,

    /// Domain or URL could not be parsed
    #[error("Malformed domain: {0}")]
    MalformedDomain(String),

    /// Required character counts do not fit in the requested length
    #[error("Not enough characters in password for all requirements: {0}")]
    LengthInfeasible(String),

    /// Custom special character set exceeds its fixed capacity
    #[error("Too many special characters: {count} given, limit is {limit}")]
    TooManySpecialChars { count: usize, limit: usize },

    /// Refusing to replace an existing database
    #[error("Database already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cipher setup error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
