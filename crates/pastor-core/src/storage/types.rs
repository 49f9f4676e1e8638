//! Core data types for the record store.
//!
//! Decrypted, a database is UTF-8 text:
//!
//! ```text
//! pastor 1804289383
//! a.example.com first-password
//! b.example.com second password with spaces
//! ```
//!
//! The first line is the header; every other line is one record, sorted
//! ascending by domain.

use crate::error::{PastorError, Result};

/// First token of the header line.
pub const HEADER_TOKEN: &str = "pastor";

/// Build the header line for a new database.
///
/// The random nonce makes two empty databases encrypt differently.
pub fn header_line(nonce: u32) -> String {
    format!("{} {}\n", HEADER_TOKEN, nonce)
}

/// One `domain password` record borrowed from the decrypted plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Bare hostname, the sort key
    pub domain: &'a str,

    /// Everything after the first space
    pub password: &'a str,
}

impl<'a> Record<'a> {
    /// Parse a record line.
    ///
    /// The line is split at its first space; a line without one is all
    /// domain. A trailing `\n` or `\r\n` is ignored.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        match line.split_once(' ') {
            Some((domain, password)) => Self { domain, password },
            None => Self {
                domain: line,
                password: "",
            },
        }
    }
}

/// Result of a merge-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No record existed for the domain; one was added at its sorted position
    Inserted,

    /// The existing record was overwritten
    Replaced,

    /// A record existed and the overwrite policy declined to replace it
    Kept,
}

impl MergeOutcome {
    /// Whether the store content changed.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Kept)
    }
}

/// Check that a domain can be stored as a record key.
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(PastorError::InvalidInput(
            "Domain cannot be empty".to_string(),
        ));
    }
    if domain.chars().any(|c| c.is_whitespace() || c == '\0') {
        return Err(PastorError::InvalidInput(format!(
            "Domain cannot contain whitespace: {:?}",
            domain
        )));
    }
    Ok(())
}

/// Check that a password fits on a single record line.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(PastorError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    if password.contains(['\n', '\r', '\0']) {
        return Err(PastorError::InvalidInput(
            "Password cannot contain line breaks or NUL bytes".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_line_format() {
        assert_eq!(header_line(42), "pastor 42\n");
    }

    #[test]
    fn test_parse_record() {
        let record = Record::parse("a.com hunter2\n");
        assert_eq!(record.domain, "a.com");
        assert_eq!(record.password, "hunter2");
    }

    #[test]
    fn test_parse_record_password_with_spaces() {
        let record = Record::parse("a.com correct horse battery\r\n");
        assert_eq!(record.domain, "a.com");
        assert_eq!(record.password, "correct horse battery");
    }

    #[test]
    fn test_parse_record_without_password() {
        let record = Record::parse("lonely.com");
        assert_eq!(record.domain, "lonely.com");
        assert_eq!(record.password, "");
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("shop.example.com").is_ok());
        assert!(validate_domain("").is_err());
        assert!(validate_domain("a b.com").is_err());
        assert!(validate_domain("a.com\n").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("p@ss word").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("line\nbreak").is_err());
        assert!(validate_password("nul\0byte").is_err());
    }

    #[test]
    fn test_merge_outcome_mutation() {
        assert!(MergeOutcome::Inserted.is_mutation());
        assert!(MergeOutcome::Replaced.is_mutation());
        assert!(!MergeOutcome::Kept.is_mutation());
    }
}
