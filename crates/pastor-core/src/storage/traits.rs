//! Overwrite policy used by merge-insert.
//!
//! When a merge-insert hits a domain that already has a record, the store
//! asks an `OverwritePolicy` whether to replace it. The CLI plugs in an
//! interactive yes/no prompt; `--force` uses [`Force`].

use crate::error::Result;

/// Decides whether an existing record may be replaced.
pub trait OverwritePolicy {
    /// Return `true` to replace the record for `domain`.
    ///
    /// # Errors
    ///
    /// An error aborts the merge-insert before the store is changed.
    fn allow_replace(&mut self, domain: &str) -> Result<bool>;
}

/// Always replace existing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Force;

impl OverwritePolicy for Force {
    fn allow_replace(&mut self, _domain: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Never replace existing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepExisting;

impl OverwritePolicy for KeepExisting {
    fn allow_replace(&mut self, _domain: &str) -> Result<bool> {
        Ok(false)
    }
}

impl<F> OverwritePolicy for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn allow_replace(&mut self, domain: &str) -> Result<bool> {
        self(domain)
    }
}
