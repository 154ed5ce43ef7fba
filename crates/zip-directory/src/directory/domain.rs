use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest value representable as a 5-digit ZIP code.
pub const MAX_ZIP: u32 = 99_999;

/// Identifier wrapper for stored contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub Uuid);

impl ContactId {
    /// Parse a path segment into an identifier. Malformed input is rejected
    /// before the store is ever consulted.
    pub fn parse(raw: &str) -> Result<Self, InvalidContactId> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| InvalidContactId)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when a path segment does not parse as a contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid contact ID")]
pub struct InvalidContactId;

/// A validated 5-digit ZIP code. `00000` is a legitimate value; only
/// out-of-range or non-numeric input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCode(u32);

impl ZipCode {
    pub fn new(value: u32) -> Option<Self> {
        (value <= MAX_ZIP).then_some(Self(value))
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().and_then(Self::new)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Inclusive ZIP interval attached to a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipRange {
    pub start: u32,
    pub end: u32,
}

impl ZipRange {
    pub fn contains(&self, zip: ZipCode) -> bool {
        self.start <= zip.value() && zip.value() <= self.end
    }
}

/// A registered directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub zip_ranges: Vec<ZipRange>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// True iff any of the contact's ranges contains the queried ZIP.
    pub fn matches_zip(&self, zip: ZipCode) -> bool {
        self.zip_ranges.iter().any(|range| range.contains(zip))
    }
}

/// A validated, normalized record ready for insertion. The store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub zip_ranges: Vec<ZipRange>,
}

/// A validated partial update. `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub zip_ranges: Option<Vec<ZipRange>>,
}

/// Projection returned by ZIP search: reachability details only, no
/// identifier and no ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSearchView {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Contact> for ContactSearchView {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}
