//! Contact registration, validation, and ZIP-range lookup.
//!
//! The flow is deliberately thin: request bodies deserialize into draft
//! types, the validator normalizes them into domain records, and the
//! service hands them to whichever `ContactRepository` the binary wired in.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Contact, ContactId, ContactSearchView, ContactUpdate, InvalidContactId, NewContact, ZipCode,
    ZipRange,
};
pub use repository::{ContactRepository, RepositoryError};
pub use router::directory_router;
pub use service::{DirectoryError, DirectoryService};
pub use validation::{validate_contact, validate_patch, ContactDraft, ContactPatch, ValidationError};
