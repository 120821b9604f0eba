//! Disciplinary violations recorded by staff.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{MissingFieldError, required_text};

/// Store-assigned violation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ViolationId(Uuid);

impl ViolationId {
    /// Wrap a UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated violation fields, used for both inserts and full replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationDraft {
    student_name: String,
    class_name: String,
    category: String,
    note: String,
}

impl ViolationDraft {
    /// Trim and validate raw fields. Every field is required.
    pub fn try_new(
        student_name: &str,
        class_name: &str,
        category: &str,
        note: &str,
    ) -> Result<Self, MissingFieldError> {
        Ok(Self {
            student_name: required_text("studentName", student_name)?,
            class_name: required_text("className", class_name)?,
            category: required_text("category", category)?,
            note: required_text("note", note)?,
        })
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Persisted violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: ViolationId,
    pub student_name: String,
    pub class_name: String,
    pub category: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}
