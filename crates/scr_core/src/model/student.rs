//! Student record.

use crate::model::id::EntityId;
use crate::model::lenient;
use serde::{Deserialize, Serialize};

/// A registered student.
///
/// `email` is unique across all students, compared case-insensitively.
/// Missing or wrongly typed fields in persisted entries load as empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: EntityId,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub email: String,
}

/// Input for `RegistrationStore::create_student`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Student {
    /// Returns whether `email` matches this student's email ignoring case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
