use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::directory::domain::{Contact, ContactId, ContactUpdate, NewContact, ZipCode};
use crate::directory::repository::{ContactRepository, RepositoryError};
use crate::directory::validation::{ContactDraft, ZipRangeDraft};
use crate::directory::DirectoryService;

/// Vec-backed store preserving insertion order, mirroring the production
/// backend's iteration behavior.
#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<Contact>>,
}

impl MemoryRepository {
    pub(super) fn snapshot(&self) -> Vec<Contact> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

#[async_trait]
impl ContactRepository for MemoryRepository {
    async fn insert(&self, contact: NewContact) -> Result<Contact, RepositoryError> {
        let stored = Contact {
            id: ContactId(Uuid::new_v4()),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            zip_ranges: contact.zip_ranges,
            created_at: Utc::now(),
        };
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self.snapshot())
    }

    async fn search_by_zip(&self, zip: ZipCode) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|contact| contact.matches_zip(zip))
            .collect())
    }

    async fn update(&self, id: &ContactId, update: ContactUpdate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|contact| contact.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(phone) = update.phone {
            record.phone = phone;
        }
        if let Some(zip_ranges) = update.zip_ranges {
            record.zip_ranges = zip_ranges;
        }
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let position = guard
            .iter()
            .position(|contact| contact.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}

/// Store double that fails every operation, for 500-path assertions.
pub(super) struct UnavailableRepository;

#[async_trait]
impl ContactRepository for UnavailableRepository {
    async fn insert(&self, _contact: NewContact) -> Result<Contact, RepositoryError> {
        Err(offline())
    }

    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Err(offline())
    }

    async fn search_by_zip(&self, _zip: ZipCode) -> Result<Vec<Contact>, RepositoryError> {
        Err(offline())
    }

    async fn update(
        &self,
        _id: &ContactId,
        _update: ContactUpdate,
    ) -> Result<(), RepositoryError> {
        Err(offline())
    }

    async fn delete(&self, _id: &ContactId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("record store offline".to_string())
}

pub(super) fn draft() -> ContactDraft {
    ContactDraft {
        name: Some("A".to_string()),
        email: Some("a@x.com".to_string()),
        phone: Some("555".to_string()),
        zip_ranges: Some(vec![ZipRangeDraft::new(10_000, 10_010)]),
    }
}

pub(super) fn build_service() -> (Arc<DirectoryService<MemoryRepository>>, Arc<MemoryRepository>)
{
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(DirectoryService::new(repository.clone()));
    (service, repository)
}

pub(super) async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}
