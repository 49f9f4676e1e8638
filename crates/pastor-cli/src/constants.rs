//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (database file, password for a domain).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Wrong passphrase or corrupt database.
    pub const AUTH_FAILED: i32 = 5;

    /// Refusing to overwrite an existing database.
    pub const ALREADY_EXISTS: i32 = 6;

    /// Passphrase entry interrupted with Ctrl-C.
    pub const INTERRUPTED: i32 = 130;
}

/// Environment variable holding the database passphrase.
pub const PASSPHRASE_ENV: &str = "PASTOR_PASSPHRASE";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PASTOR_CONFIG";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "PASTOR_LOG";
