//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_database_path, PastorConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking PASTOR_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from CLI args, then config, then the XDG default.
pub fn resolve_database_path(cli: &Cli, config: &PastorConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.database.as_deref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.database.path.as_deref() {
        return Ok(PathBuf::from(path));
    }
    default_database_path()
}

/// Error message when the database file is missing.
pub fn missing_database_message(path: &Path) -> String {
    format!(
        "No password database found at {}\n\nRun:\n  pastor create\n\nOr specify a database path:\n  PASTOR_DATABASE=/path/to/pastor.db pastor create",
        path.display()
    )
}
