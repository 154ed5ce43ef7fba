use async_trait::async_trait;

use super::domain::{Contact, ContactId, ContactUpdate, NewContact, ZipCode};

/// Storage abstraction so the directory can be exercised without a live
/// backend. The production implementation lives with the service binary.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a validated record, assigning its identifier and creation
    /// timestamp.
    async fn insert(&self, contact: NewContact) -> Result<Contact, RepositoryError>;

    /// All records in insertion order. Empty is a normal result.
    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// Records whose ranges contain the queried ZIP. Empty is a normal
    /// result; ordering follows store iteration order.
    async fn search_by_zip(&self, zip: ZipCode) -> Result<Vec<Contact>, RepositoryError>;

    /// Merge the supplied fields into an existing record.
    async fn update(&self, id: &ContactId, update: ContactUpdate) -> Result<(), RepositoryError>;

    /// Remove a record permanently.
    async fn delete(&self, id: &ContactId) -> Result<(), RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
