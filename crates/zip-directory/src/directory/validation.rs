use serde::Deserialize;
use serde_json::Value;

use super::domain::{ContactUpdate, NewContact, ZipRange, MAX_ZIP};

/// Raw creation payload. Unknown keys are rejected at the deserializer so
/// shape problems never reach business logic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zip_ranges: Option<Vec<ZipRangeDraft>>,
}

/// Raw range entry. Bounds stay as JSON values so a string or fractional
/// bound yields a validation failure instead of a deserialization fault.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZipRangeDraft {
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
}

impl ZipRangeDraft {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: Some(Value::from(start)),
            end: Some(Value::from(end)),
        }
    }
}

/// Raw partial-update payload for PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zip_ranges: Option<Vec<ZipRangeDraft>>,
}

/// Client-correctable input problems, surfaced as HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing or empty required field: {0}")]
    MissingField(&'static str),
    #[error("invalid ZIP range format")]
    MalformedRange,
    #[error("no fields provided to update")]
    EmptyUpdate,
}

/// Validate a creation payload and normalize it into a storable record.
pub fn validate_contact(draft: ContactDraft) -> Result<NewContact, ValidationError> {
    let name = require_text(draft.name, "name")?;
    let email = require_text(draft.email, "email")?;
    let phone = require_text(draft.phone, "phone")?;
    let zip_ranges = require_ranges(draft.zip_ranges)?;

    Ok(NewContact {
        name,
        email,
        phone,
        zip_ranges,
    })
}

/// Validate a PATCH payload. Each supplied field must pass the same rules
/// as creation; a body supplying nothing at all is rejected.
pub fn validate_patch(patch: ContactPatch) -> Result<ContactUpdate, ValidationError> {
    let update = ContactUpdate {
        name: patch.name.map(|v| provided_text(v, "name")).transpose()?,
        email: patch.email.map(|v| provided_text(v, "email")).transpose()?,
        phone: patch.phone.map(|v| provided_text(v, "phone")).transpose()?,
        zip_ranges: patch
            .zip_ranges
            .map(|ranges| require_ranges(Some(ranges)))
            .transpose()?,
    };

    if update.name.is_none()
        && update.email.is_none()
        && update.phone.is_none()
        && update.zip_ranges.is_none()
    {
        return Err(ValidationError::EmptyUpdate);
    }

    Ok(update)
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(text) => provided_text(text, field),
        None => Err(ValidationError::MissingField(field)),
    }
}

fn provided_text(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn require_ranges(
    ranges: Option<Vec<ZipRangeDraft>>,
) -> Result<Vec<ZipRange>, ValidationError> {
    let ranges = ranges.ok_or(ValidationError::MissingField("zipRanges"))?;
    if ranges.is_empty() {
        return Err(ValidationError::MissingField("zipRanges"));
    }
    ranges.iter().map(normalize_range).collect()
}

fn normalize_range(draft: &ZipRangeDraft) -> Result<ZipRange, ValidationError> {
    let start = numeric_bound(draft.start.as_ref())?;
    let end = numeric_bound(draft.end.as_ref())?;
    if start > end {
        return Err(ValidationError::MalformedRange);
    }
    Ok(ZipRange { start, end })
}

fn numeric_bound(value: Option<&Value>) -> Result<u32, ValidationError> {
    let raw = value
        .and_then(Value::as_i64)
        .ok_or(ValidationError::MalformedRange)?;
    if raw < 0 || raw > i64::from(MAX_ZIP) {
        return Err(ValidationError::MalformedRange);
    }
    Ok(raw as u32)
}
