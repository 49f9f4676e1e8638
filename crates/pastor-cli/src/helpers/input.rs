//! Input handling helpers for passphrases and overwrite confirmation.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Confirm, Password};
use pastor_core::{OverwritePolicy, PastorError};
use zeroize::Zeroizing;

use crate::constants::PASSPHRASE_ENV;
use crate::errors::CliError;

/// Read the passphrase from the `PASTOR_PASSPHRASE` env var, if set.
pub fn passphrase_from_env() -> Option<Zeroizing<String>> {
    let value = Zeroizing::new(std::env::var(PASSPHRASE_ENV).ok()?);
    if value.is_empty() {
        return None;
    }
    Some(value)
}

/// Prompt for a passphrase with echo off.
///
/// When stdin is not a terminal a single line is read from it instead.
pub fn prompt_passphrase(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        return read_stdin_line();
    }
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Zeroizing::new)
        .map_err(prompt_error)
}

/// Prompt twice for a new passphrase and require both to match.
pub fn prompt_new_passphrase() -> anyhow::Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        return read_stdin_line();
    }
    Password::new()
        .with_prompt("Enter new passphrase")
        .with_confirmation("Confirm passphrase", "Passphrases do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(prompt_error)
}

/// Ctrl-C during a prompt ends the command with the interrupted exit code.
fn prompt_error(err: dialoguer::Error) -> anyhow::Error {
    let dialoguer::Error::IO(source) = err;
    if source.kind() == io::ErrorKind::Interrupted {
        return CliError::Interrupted.into();
    }
    anyhow::anyhow!("Failed to read passphrase: {}", source)
}

fn read_stdin_line() -> anyhow::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::with_capacity(256));
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    if read == 0 {
        return Err(CliError::invalid_input(
            "No passphrase provided on stdin. Use --password or PASTOR_PASSPHRASE.",
        )
        .into());
    }
    trim_line_ending(&mut line);
    Ok(line)
}

fn trim_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}

/// Asks the user before an existing password is replaced.
///
/// On a terminal this is a yes/no prompt defaulting to yes. Otherwise one
/// line is read from stdin and only an answer starting with `n` declines.
pub struct ConfirmOverwrite;

impl OverwritePolicy for ConfirmOverwrite {
    fn allow_replace(&mut self, domain: &str) -> pastor_core::Result<bool> {
        let prompt = format!("A password for {} is already stored. Replace it?", domain);

        if io::stdin().is_terminal() {
            return Confirm::new()
                .with_prompt(prompt)
                .default(true)
                .interact()
                .map_err(|e| PastorError::from(io::Error::other(e)));
        }

        eprint!("{} [Y/n] ", prompt);
        io::stderr().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(accepts(&answer))
    }
}

fn accepts(answer: &str) -> bool {
    !matches!(answer.trim_start().chars().next(), Some('n' | 'N'))
}
