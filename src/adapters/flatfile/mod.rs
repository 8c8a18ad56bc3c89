//! Flat-file adapter: Implementation of CredentialStore.
//!
//! One record per line, `username,password_hash,email`. The file is opened,
//! read or appended, and closed on every operation.
//!
//! # Locking
//!
//! Registration holds an exclusive advisory lock across the duplicate scan
//! and the append, and reads hold a shared lock, so concurrent registrations
//! cannot interleave partial lines or claim the same username twice. Locks
//! are advisory: other tools editing the file are not excluded.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::CredentialRecord;
use crate::ports::CredentialStore;

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Credential file I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock credential file {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Credential store backed by a plain text file.
#[derive(Debug, Clone)]
pub struct FlatFileCredentialStore {
    path: PathBuf,
}

impl FlatFileCredentialStore {
    /// Create a store for the given file. The file is created lazily on first registration.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn lock_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Lock {
            path: self.path.clone(),
            source,
        }
    }
}

fn ends_with_newline(mut file: &File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl FlatFileCredentialStore {
    /// Read every well-formed record from an open, locked file.
    ///
    /// Lines that are not UTF-8 or do not parse are skipped with a warning.
    fn scan(&self, file: &File) -> Result<Vec<CredentialRecord>, StoreError> {
        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
            let bytes = line.map_err(|e| self.io_err(e))?;

            // Never log the line itself: it may hold a hash or e-mail.
            let Ok(line) = String::from_utf8(bytes) else {
                tracing::warn!(
                    "Skipping non-UTF-8 credential record at line {} of {:?}",
                    idx + 1,
                    self.path
                );
                continue;
            };

            if line.trim().is_empty() {
                continue;
            }

            match CredentialRecord::parse_line(&line) {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    "Skipping malformed credential record at line {} of {:?}",
                    idx + 1,
                    self.path
                ),
            }
        }
        Ok(records)
    }

    fn append_unique(&self, mut file: &File, record: &CredentialRecord) -> Result<bool, StoreError> {
        if self
            .scan(file)?
            .iter()
            .any(|r| r.username == record.username)
        {
            return Ok(false);
        }

        let mut line = String::new();
        if !ends_with_newline(file).map_err(|e| self.io_err(e))? {
            line.push('\n');
        }
        line.push_str(&record.to_line());
        line.push('\n');
        file.write_all(line.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.io_err(e))?;
        Ok(true)
    }
}

impl CredentialStore for FlatFileCredentialStore {
    type Error = StoreError;

    fn register(&self, record: &CredentialRecord) -> Result<bool, Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;

        // One exclusive lock covers both the duplicate scan and the append.
        FileExt::lock_exclusive(&file).map_err(|e| self.lock_err(e))?;
        let appended = self.append_unique(&file, record);
        let _ = FileExt::unlock(&file);

        if appended? {
            tracing::debug!("Appended credential record to {:?}", self.path);
            Ok(true)
        } else {
            tracing::debug!("Username already present in {:?}", self.path);
            Ok(false)
        }
    }

    fn records(&self) -> Result<Vec<CredentialRecord>, Self::Error> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Credential file {:?} not found, no users yet", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };

        FileExt::lock_shared(&file).map_err(|e| self.lock_err(e))?;
        let records = self.scan(&file);
        let _ = FileExt::unlock(&file);
        records
    }
}
