//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Core errors are
//! classified here too, so handlers can simply propagate them with `?`.

use std::fmt;

use pastor_core::PastorError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (database, password for a domain)
    NotFound { message: String, hint: String },

    /// Refusing to overwrite something
    AlreadyExists { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Passphrase entry was interrupted
    Interrupted,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } | CliError::AlreadyExists { message, .. } => {
                write!(f, "{}", message)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Interrupted => write!(f, "Interrupted"),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AlreadyExists error with message and hint.
    pub fn already_exists(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AlreadyExists {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Interrupted => exit_codes::INTERRUPTED,
        }
    }

    /// Get the hint attached to this error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::AlreadyExists { hint, .. } => Some(hint),
            CliError::InvalidInput(_) | CliError::Interrupted => None,
        }
    }
}

/// Exit code for a core error.
pub fn core_exit_code(err: &PastorError) -> i32 {
    match err {
        PastorError::DatabaseMissing(_) => exit_codes::NOT_FOUND,
        PastorError::WrongKeyOrCorrupt => exit_codes::AUTH_FAILED,
        PastorError::AlreadyExists(_) => exit_codes::ALREADY_EXISTS,
        PastorError::ConfigConflict(_)
        | PastorError::MalformedDomain(_)
        | PastorError::LengthInfeasible(_)
        | PastorError::TooManySpecialChars { .. }
        | PastorError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        PastorError::Crypto(_) | PastorError::Io { .. } => exit_codes::GENERAL,
    }
}

/// Hint for a core error, if one helps.
fn core_hint(err: &PastorError) -> Option<&'static str> {
    match err {
        PastorError::WrongKeyOrCorrupt => {
            Some("Check your passphrase. A damaged file cannot be told apart from a wrong key.")
        }
        PastorError::DatabaseMissing(_) => Some("Run `pastor create` to make a new database."),
        PastorError::AlreadyExists(_) => Some("Pass --force to replace it."),
        PastorError::MalformedDomain(_) => {
            Some("Pass a full URL such as https://example.com/login.")
        }
        PastorError::ConfigConflict(_) => {
            Some("Drop --no-digits/--no-special-characters or the matching --number-of-* flag.")
        }
        PastorError::LengthInfeasible(_) => {
            Some("Raise --max or lower the --number-of-* requirements.")
        }
        _ => None,
    }
}

/// Resolve the exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<PastorError>() {
        return core_exit_code(core_err);
    }
    exit_codes::GENERAL
}

/// Resolve the hint for any error reaching `main`.
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.hint().map(str::to_string);
    }
    err.downcast_ref::<PastorError>()
        .and_then(core_hint)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(
            CliError::not_found("x", "y").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::invalid_input("x").exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(CliError::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_core_errors_through_anyhow() {
        let err = anyhow::Error::from(PastorError::WrongKeyOrCorrupt);
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_FAILED);
        assert!(hint_for(&err).is_some());

        let err = anyhow::Error::from(PastorError::DatabaseMissing(PathBuf::from("x.db")));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);

        let err = anyhow::Error::from(PastorError::ConfigConflict("x".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_unknown_error_is_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::GENERAL);
        assert!(hint_for(&err).is_none());
    }

    #[test]
    fn test_hint_not_part_of_message() {
        let err = CliError::not_found("No password", "store one");
        assert_eq!(err.to_string(), "No password");
        assert_eq!(err.hint(), Some("store one"));
    }
}
