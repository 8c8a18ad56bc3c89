//! Credential store port: Trait for persisting registered users.
//!
//! Hashing is done by the caller; stores only persist and scan records.

use crate::domain::CredentialRecord;

/// Trait for credential persistence.
///
/// Records are append-only: never updated or deleted.
pub trait CredentialStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append a new record unless its username is already taken.
    ///
    /// The duplicate check and the append are atomic with respect to other
    /// registrations. Returns `Ok(false)` without writing on a duplicate.
    ///
    /// # Errors
    /// Returns error if the record cannot be persisted.
    fn register(&self, record: &CredentialRecord) -> Result<bool, Self::Error>;

    /// All readable records in storage order.
    ///
    /// An uninitialized store has no records.
    ///
    /// # Errors
    /// Returns error if storage exists but cannot be read.
    fn records(&self) -> Result<Vec<CredentialRecord>, Self::Error>;

    /// First record whose username matches exactly (case-sensitive).
    ///
    /// # Errors
    /// Returns error if storage exists but cannot be read.
    fn find(&self, username: &str) -> Result<Option<CredentialRecord>, Self::Error> {
        Ok(self
            .records()?
            .into_iter()
            .find(|r| r.username == username))
    }
}
