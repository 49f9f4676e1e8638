//! Application context for the Pastor CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use pastor_core::{derive_key, Database, PastorError};
use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::config::{load_config, PastorConfig};
use crate::errors::CliError;
use crate::helpers::{passphrase_from_env, prompt_new_passphrase, prompt_passphrase};

use super::resolver::{missing_database_message, resolve_config_path, resolve_database_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    inline_password: Option<Zeroizing<String>>,
    config: OnceCell<PastorConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    ///
    /// Pass the `--password` value taken out of `cli` with
    /// [`take_inline_password`].
    pub fn new(cli: &'a Cli, inline_password: Option<Zeroizing<String>>) -> Self {
        Self {
            cli,
            inline_password,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&PastorConfig> {
        self.config
            .get_or_try_init(|| load_config(&resolve_config_path()?))
    }

    /// Resolve the database file path.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        resolve_database_path(self.cli, self.config()?)
    }

    /// Passphrase for an existing database: `--password`, then
    /// `PASTOR_PASSPHRASE`, then a prompt.
    pub fn passphrase(&self) -> anyhow::Result<Zeroizing<String>> {
        if let Some(value) = self.inline_password.as_ref() {
            return Ok(value.clone());
        }
        if let Some(value) = passphrase_from_env() {
            return Ok(value);
        }
        prompt_passphrase("Enter passphrase")
    }

    /// Passphrase for a new database; a prompt asks twice.
    pub fn new_passphrase(&self) -> anyhow::Result<Zeroizing<String>> {
        if let Some(value) = self.inline_password.as_ref() {
            return Ok(value.clone());
        }
        if let Some(value) = passphrase_from_env() {
            return Ok(value);
        }
        prompt_new_passphrase()
    }

    /// Open and verify the database.
    ///
    /// Nothing is retried: a wrong passphrase ends the command.
    pub fn unlock(&self) -> anyhow::Result<Database> {
        let path = self.database_path()?;
        if !path.exists() {
            return Err(missing_database(&path));
        }

        let passphrase = self.passphrase()?;
        let key = derive_key(passphrase.as_bytes());
        match Database::unlock(&path, key) {
            Ok(database) => {
                tracing::debug!(path = %path.display(), records = database.len(), "database unlocked");
                Ok(database)
            }
            Err(PastorError::DatabaseMissing(path)) => Err(missing_database(&path)),
            Err(err) => Err(err.into()),
        }
    }
}

/// Move the `--password` value out of `cli` so it is wiped on drop.
pub fn take_inline_password(cli: &mut Cli) -> Option<Zeroizing<String>> {
    cli.password.take().map(Zeroizing::new)
}

fn missing_database(path: &std::path::Path) -> anyhow::Error {
    CliError::not_found(
        missing_database_message(path),
        "Use --database to point at an existing file.",
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_inline_password_leaves_cli() {
        let mut cli = Cli::try_parse_from(["pastor", "-p", "secret key", "list"]).unwrap();
        let inline = take_inline_password(&mut cli);

        assert!(cli.password.is_none());
        assert_eq!(inline.as_ref().map(|p| p.as_str()), Some("secret key"));

        let ctx = AppContext::new(&cli, inline);
        assert_eq!(ctx.passphrase().unwrap().as_str(), "secret key");
        assert_eq!(ctx.new_passphrase().unwrap().as_str(), "secret key");
    }

    #[test]
    fn test_no_inline_password() {
        let mut cli = Cli::try_parse_from(["pastor", "list"]).unwrap();
        assert!(take_inline_password(&mut cli).is_none());
    }
}
