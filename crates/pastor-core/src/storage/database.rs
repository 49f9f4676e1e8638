//! Encrypted sorted record store.
//!
//! A [`Database`] is one unlock session: it owns the key and the decrypted
//! plaintext for the duration of a single operation, and both are zeroized
//! when it is dropped. Mutations rewrite the whole plaintext in memory;
//! [`Database::save`] then re-encrypts everything and replaces the file.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::DerivedKey;
use crate::error::{PastorError, Result};
use crate::storage::codec::{decrypt, encrypt};
use crate::storage::traits::OverwritePolicy;
use crate::storage::types::{
    header_line, validate_domain, validate_password, MergeOutcome, Record, HEADER_TOKEN,
};

/// An unlocked password database.
pub struct Database {
    path: PathBuf,
    key: DerivedKey,
    plaintext: Zeroizing<String>,
    dirty: bool,
}

impl Database {
    /// Create a new database holding only a header line, and write it to disk.
    ///
    /// This is the only way a database file comes into existence.
    ///
    /// # Errors
    ///
    /// Returns `PastorError::AlreadyExists` if `path` exists and `force` is
    /// not set, or `PastorError::Io` if the file cannot be written.
    pub fn create(path: &Path, key: DerivedKey, force: bool) -> Result<Self> {
        if path.exists() && !force {
            return Err(PastorError::AlreadyExists(path.to_path_buf()));
        }

        let mut database = Self {
            path: path.to_path_buf(),
            key,
            plaintext: Zeroizing::new(header_line(rand::random::<u32>())),
            dirty: true,
        };
        database.save()?;
        tracing::debug!(path = %path.display(), "created database");

        Ok(database)
    }

    /// Read and decrypt an existing database.
    ///
    /// This does not verify the key; see [`Database::check_header`].
    ///
    /// # Errors
    ///
    /// Returns `PastorError::DatabaseMissing` if the file does not exist and
    /// `PastorError::WrongKeyOrCorrupt` if the decrypted bytes are not text.
    pub fn open(path: &Path, key: DerivedKey) -> Result<Self> {
        let ciphertext = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PastorError::DatabaseMissing(path.to_path_buf()),
            _ => PastorError::from(err),
        })?;

        let decrypted = decrypt(&ciphertext, &key)?;
        let plaintext = String::from_utf8(decrypted).map_err(|err| {
            let mut bytes = err.into_bytes();
            bytes.zeroize();
            PastorError::WrongKeyOrCorrupt
        })?;

        tracing::debug!(
            path = %path.display(),
            encrypted_bytes = ciphertext.len(),
            "opened database"
        );

        Ok(Self {
            path: path.to_path_buf(),
            key,
            plaintext: Zeroizing::new(plaintext),
            dirty: false,
        })
    }

    /// Open a database and verify its header.
    pub fn unlock(path: &Path, key: DerivedKey) -> Result<Self> {
        let database = Self::open(path, key)?;
        database.check_header()?;
        Ok(database)
    }

    /// Verify that the first token of the first line is the header token.
    ///
    /// # Errors
    ///
    /// Returns `PastorError::WrongKeyOrCorrupt`. A wrong key and a damaged
    /// file cannot be told apart here.
    pub fn check_header(&self) -> Result<()> {
        let token = self
            .plaintext
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().next());

        if token == Some(HEADER_TOKEN) {
            Ok(())
        } else {
            Err(PastorError::WrongKeyOrCorrupt)
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are changes not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Iterate over all records in file order, skipping the header.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.plaintext.lines().skip(1).map(Record::parse)
    }

    /// Iterate over all stored domains in file order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.records().map(|record| record.domain)
    }

    /// Number of records, not counting the header.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    /// Whether the database holds no records.
    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }

    /// Find the password stored for `domain`.
    ///
    /// Records are sorted, so the scan stops at the first domain greater
    /// than the target.
    pub fn lookup(&self, domain: &str) -> Option<Zeroizing<String>> {
        for record in self.records() {
            match record.domain.cmp(domain) {
                Ordering::Equal => return Some(Zeroizing::new(record.password.to_string())),
                Ordering::Greater => break,
                Ordering::Less => {}
            }
        }
        None
    }

    /// Insert or update the record for `domain`, keeping records sorted.
    ///
    /// The header is copied first. An existing record is replaced only if
    /// `policy` allows it; otherwise it is left as it was. A new record goes
    /// in front of the first greater domain, or at the end.
    ///
    /// # Errors
    ///
    /// Returns `PastorError::InvalidInput` if the domain or password cannot
    /// be stored as a record line, `PastorError::WrongKeyOrCorrupt` if there
    /// is no header, or whatever `policy` returns. The store is unchanged on
    /// error.
    pub fn merge_insert(
        &mut self,
        domain: &str,
        password: &str,
        policy: &mut dyn OverwritePolicy,
    ) -> Result<MergeOutcome> {
        validate_domain(domain)?;
        validate_password(password)?;

        let mut lines = self.plaintext.lines();
        let header = lines.next().ok_or(PastorError::WrongKeyOrCorrupt)?;

        let capacity = self.plaintext.len() + domain.len() + password.len() + 3;
        let mut merged = Zeroizing::new(String::with_capacity(capacity));
        push_line(&mut merged, header);

        let mut outcome = None;
        for line in lines {
            if outcome.is_some() {
                push_line(&mut merged, line);
                continue;
            }

            match Record::parse(line).domain.cmp(domain) {
                Ordering::Equal => {
                    if policy.allow_replace(domain)? {
                        push_record(&mut merged, domain, password);
                        outcome = Some(MergeOutcome::Replaced);
                    } else {
                        push_line(&mut merged, line);
                        outcome = Some(MergeOutcome::Kept);
                    }
                }
                Ordering::Greater => {
                    push_record(&mut merged, domain, password);
                    push_line(&mut merged, line);
                    outcome = Some(MergeOutcome::Inserted);
                }
                Ordering::Less => push_line(&mut merged, line),
            }
        }

        let outcome = outcome.unwrap_or_else(|| {
            push_record(&mut merged, domain, password);
            MergeOutcome::Inserted
        });

        if outcome.is_mutation() {
            self.plaintext = merged;
            self.dirty = true;
        }
        tracing::debug!(?outcome, records = self.len(), "merge-insert finished");

        Ok(outcome)
    }

    /// Encrypt the full plaintext and replace the database file.
    pub fn save(&mut self) -> Result<()> {
        let ciphertext = encrypt(self.plaintext.as_bytes(), &self.key)?;
        crate::fs::write_replace(&self.path, &ciphertext)?;
        self.dirty = false;

        tracing::debug!(
            path = %self.path.display(),
            encrypted_bytes = ciphertext.len(),
            "saved database"
        );
        Ok(())
    }

    /// Save pending changes and end the session.
    pub fn close(mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if self.dirty {
            tracing::warn!(
                path = %self.path.display(),
                "database dropped with unsaved changes"
            );
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("key", &self.key)
            .field("plaintext", &"[REDACTED]")
            .field("dirty", &self.dirty)
            .finish()
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_record(out: &mut String, domain: &str, password: &str) {
    out.push_str(domain);
    out.push(' ');
    out.push_str(password);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_key;
    use crate::storage::traits::{Force, KeepExisting};
    use tempfile::tempdir;

    fn key() -> DerivedKey {
        derive_key(b"test-passphrase")
    }

    fn new_database(dir: &Path) -> Database {
        Database::create(&dir.join("pastor.db"), key(), false).unwrap()
    }

    fn domains(database: &Database) -> Vec<String> {
        database.domains().map(str::to_string).collect()
    }

    #[test]
    fn test_create_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pastor.db");
        let database = Database::create(&path, key(), false).unwrap();
        assert_eq!(database.path(), path.as_path());
        assert!(!database.is_dirty());

        let plaintext = decrypt(&fs::read(&path).unwrap(), &key()).unwrap();
        let text = String::from_utf8(plaintext).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let (token, nonce) = header.split_once(' ').unwrap();

        assert_eq!(token, "pastor");
        assert!(!nonce.is_empty());
        assert!(nonce.chars().all(|c| c.is_ascii_digit()));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pastor.db");
        Database::create(&path, key(), false).unwrap();

        let result = Database::create(&path, key(), false);
        assert!(matches!(result, Err(PastorError::AlreadyExists(_))));

        assert!(Database::create(&path, key(), true).is_ok());
    }

    #[test]
    fn test_open_missing_database() {
        let dir = tempdir().unwrap();
        let result = Database::open(&dir.path().join("nope.db"), key());
        assert!(matches!(result, Err(PastorError::DatabaseMissing(_))));
    }

    #[test]
    fn test_unlock_wrong_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pastor.db");
        Database::create(&path, key(), false).unwrap();

        let result = Database::unlock(&path, derive_key(b"not-the-passphrase"));
        assert!(matches!(result, Err(PastorError::WrongKeyOrCorrupt)));
    }

    #[test]
    fn test_check_header_rejects_foreign_plaintext() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.db");
        fs::write(&path, encrypt(b"vault 1\na.com x\n", &key()).unwrap()).unwrap();

        let database = Database::open(&path, key()).unwrap();
        assert!(matches!(
            database.check_header(),
            Err(PastorError::WrongKeyOrCorrupt)
        ));
    }

    #[test]
    fn test_check_header_rejects_empty_plaintext() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.db");
        fs::write(&path, b"").unwrap();

        let database = Database::open(&path, key()).unwrap();
        assert!(database.check_header().is_err());
    }

    #[test]
    fn test_sorted_insertion_order() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());

        database.merge_insert("b.com", "x", &mut Force).unwrap();
        database.merge_insert("a.com", "y", &mut Force).unwrap();

        let records: Vec<_> = database.records().collect();
        assert_eq!(
            records,
            vec![
                Record {
                    domain: "a.com",
                    password: "y"
                },
                Record {
                    domain: "b.com",
                    password: "x"
                },
            ]
        );
        assert!(database.plaintext.starts_with("pastor "));
    }

    #[test]
    fn test_lookup_not_found() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        database.merge_insert("b.com", "x", &mut Force).unwrap();
        database.merge_insert("a.com", "y", &mut Force).unwrap();

        assert!(database.lookup("c.com").is_none());
        assert!(database.lookup("0.com").is_none());
        assert_eq!(database.lookup("a.com").unwrap().as_str(), "y");
        assert_eq!(database.lookup("b.com").unwrap().as_str(), "x");
    }

    #[test]
    fn test_insert_in_middle_and_end() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        for domain in ["m.com", "a.com", "z.com", "k.com", "q.com"] {
            let outcome = database.merge_insert(domain, "pw", &mut Force).unwrap();
            assert_eq!(outcome, MergeOutcome::Inserted);
        }

        assert_eq!(
            domains(&database),
            vec!["a.com", "k.com", "m.com", "q.com", "z.com"]
        );
    }

    #[test]
    fn test_force_overwrite_leaves_single_record() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        database.merge_insert("a.com", "one", &mut Force).unwrap();
        database.merge_insert("d.com", "one", &mut Force).unwrap();

        let outcome = database.merge_insert("d.com", "two", &mut Force).unwrap();

        assert_eq!(outcome, MergeOutcome::Replaced);
        assert_eq!(domains(&database), vec!["a.com", "d.com"]);
        assert_eq!(database.lookup("d.com").unwrap().as_str(), "two");
    }

    #[test]
    fn test_declined_overwrite_keeps_old_record_and_rest() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        for domain in ["a.com", "b.com", "c.com"] {
            database.merge_insert(domain, "old", &mut Force).unwrap();
        }
        database.save().unwrap();

        let outcome = database
            .merge_insert("b.com", "new", &mut KeepExisting)
            .unwrap();

        assert_eq!(outcome, MergeOutcome::Kept);
        assert!(!database.is_dirty());
        assert_eq!(domains(&database), vec!["a.com", "b.com", "c.com"]);
        assert_eq!(database.lookup("b.com").unwrap().as_str(), "old");
    }

    #[test]
    fn test_policy_consulted_only_on_existing_domain() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        let mut asked = Vec::new();
        let mut policy = |domain: &str| -> Result<bool> {
            asked.push(domain.to_string());
            Ok(true)
        };

        database.merge_insert("a.com", "1", &mut policy).unwrap();
        database.merge_insert("a.com", "2", &mut policy).unwrap();

        assert_eq!(asked, vec!["a.com"]);
    }

    #[test]
    fn test_policy_error_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        database.merge_insert("a.com", "1", &mut Force).unwrap();
        database.save().unwrap();

        let mut failing =
            |_: &str| -> Result<bool> { Err(PastorError::InvalidInput("no tty".to_string())) };
        let result = database.merge_insert("a.com", "2", &mut failing);

        assert!(result.is_err());
        assert!(!database.is_dirty());
        assert_eq!(database.lookup("a.com").unwrap().as_str(), "1");
    }

    #[test]
    fn test_merge_rejects_invalid_records() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());

        assert!(database.merge_insert("a b.com", "pw", &mut Force).is_err());
        assert!(database.merge_insert("a.com", "pw\nx", &mut Force).is_err());
        assert!(database.is_empty());
    }

    #[test]
    fn test_legacy_file_without_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.db");
        let legacy = b"pastor 77\na.com first\nc.com third";
        fs::write(&path, encrypt(legacy, &key()).unwrap()).unwrap();

        let mut database = Database::unlock(&path, key()).unwrap();
        assert_eq!(database.lookup("c.com").unwrap().as_str(), "third");

        database.merge_insert("d.com", "fourth", &mut Force).unwrap();
        assert_eq!(domains(&database), vec!["a.com", "c.com", "d.com"]);
        assert_eq!(database.lookup("c.com").unwrap().as_str(), "third");
    }

    #[test]
    fn test_close_persists_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pastor.db");
        let mut database = Database::create(&path, key(), false).unwrap();
        database
            .merge_insert("shop.example.com", "s3cret pass", &mut Force)
            .unwrap();
        database.close().unwrap();

        let reopened = Database::unlock(&path, key()).unwrap();
        assert_eq!(
            reopened.lookup("shop.example.com").unwrap().as_str(),
            "s3cret pass"
        );
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_drop_without_close_discards_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pastor.db");
        {
            let mut database = Database::create(&path, key(), false).unwrap();
            database.merge_insert("a.com", "pw", &mut Force).unwrap();
        }

        let reopened = Database::unlock(&path, key()).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_debug_redacts_plaintext() {
        let dir = tempdir().unwrap();
        let mut database = new_database(dir.path());
        database
            .merge_insert("a.com", "visible-secret", &mut Force)
            .unwrap();

        let debug_output = format!("{:?}", database);
        assert!(!debug_output.contains("visible-secret"));
        assert!(debug_output.contains("REDACTED"));
    }
}
