use std::sync::Arc;

use super::domain::{Contact, ContactId, ZipCode};
use super::repository::{ContactRepository, RepositoryError};
use super::validation::{
    validate_contact, validate_patch, ContactDraft, ContactPatch, ValidationError,
};

/// Service composing the validator and the injected record store. One
/// instance is constructed at startup and shared across requests.
pub struct DirectoryService<R> {
    repository: Arc<R>,
}

impl<R> DirectoryService<R>
where
    R: ContactRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new contact.
    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, DirectoryError> {
        let contact = validate_contact(draft)?;
        let stored = self.repository.insert(contact).await?;
        Ok(stored)
    }

    /// Every stored contact. An empty directory is not a fault.
    pub async fn list_all(&self) -> Result<Vec<Contact>, DirectoryError> {
        Ok(self.repository.list_all().await?)
    }

    /// Contacts whose ranges contain the queried ZIP.
    pub async fn search(&self, zip: ZipCode) -> Result<Vec<Contact>, DirectoryError> {
        Ok(self.repository.search_by_zip(zip).await?)
    }

    /// Apply a partial update to an existing contact.
    pub async fn update(&self, id: &ContactId, patch: ContactPatch) -> Result<(), DirectoryError> {
        let update = validate_patch(patch)?;
        self.repository.update(id, update).await?;
        Ok(())
    }

    /// Remove a contact. Deletion is immediate and permanent.
    pub async fn delete(&self, id: &ContactId) -> Result<(), DirectoryError> {
        self.repository.delete(id).await?;
        Ok(())
    }
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound))
    }
}
