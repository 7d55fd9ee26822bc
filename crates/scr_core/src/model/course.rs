//! Course record.

use crate::model::id::EntityId;
use crate::model::lenient;
use serde::{Deserialize, Serialize};

/// A course offering, e.g. `CSC101 Intro to Computer Science`.
///
/// `code` is not unique at runtime; two records may share one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: EntityId,
    #[serde(deserialize_with = "lenient::or_default")]
    pub code: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    /// Fractional, negative or non-numeric persisted values load as `None`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::credits"
    )]
    pub credits: Option<u32>,
}

/// Input for `RegistrationStore::create_course`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    pub credits: Option<u32>,
}

impl NewCourse {
    pub fn new(code: impl Into<String>, title: impl Into<String>, credits: Option<u32>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
        }
    }
}
