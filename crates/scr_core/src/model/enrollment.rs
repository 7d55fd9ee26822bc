//! Enrollment record: the join between one student and one course.
//!
//! # Invariants
//! - `(student_id, course_id)` is unique among enrollments.
//! - `student_id`/`course_id` resolve to existing records at creation time.
//! - `enrolled_on` is an ISO `YYYY-MM-DD` date string, stored verbatim.

use crate::model::id::EntityId;
use crate::model::lenient;
use serde::{Deserialize, Serialize};

/// Enrollment lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Currently taking the course.
    #[default]
    Active,
    /// Finished the course.
    Completed,
    /// Left the course before completion.
    Dropped,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 3] = [Self::Active, Self::Completed, Self::Dropped];

    /// Wire value (`active|completed|dropped`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    /// Capitalized label for table rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    /// Parses a wire value, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "dropped" => Some(Self::Dropped),
            _ => None,
        }
    }
}

/// Canonical enrollment record.
///
/// Persisted status text is matched ignoring case; unknown values load as
/// `active`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: EntityId,
    #[serde(deserialize_with = "lenient::or_default")]
    pub student_id: EntityId,
    #[serde(deserialize_with = "lenient::or_default")]
    pub course_id: EntityId,
    #[serde(deserialize_with = "lenient::status")]
    pub status: EnrollmentStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub enrolled_on: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    pub notes: Option<String>,
}

/// Input for `RegistrationStore::create_enrollment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: EntityId,
    pub course_id: EntityId,
    pub status: EnrollmentStatus,
    pub enrolled_on: String,
    pub notes: Option<String>,
}

/// Partial update for one enrollment.
///
/// `None` leaves a field unchanged. `notes: Some(None)` clears the notes.
///
/// ```
/// use scr_core::{EnrollmentPatch, EnrollmentStatus, EntityId};
///
/// let patch = EnrollmentPatch {
///     status: Some(EnrollmentStatus::Completed),
///     ..EnrollmentPatch::new(EntityId::from("e-1"))
/// };
/// assert!(patch.enrolled_on.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentPatch {
    pub id: EntityId,
    pub student_id: Option<EntityId>,
    pub course_id: Option<EntityId>,
    pub status: Option<EnrollmentStatus>,
    pub enrolled_on: Option<String>,
    pub notes: Option<Option<String>>,
}

impl EnrollmentPatch {
    /// Creates an empty patch targeting `id`.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Returns `current` with every present patch field written over it.
    pub fn merge_onto(&self, current: &Enrollment) -> Enrollment {
        let mut next = current.clone();
        if let Some(student_id) = &self.student_id {
            next.student_id = student_id.clone();
        }
        if let Some(course_id) = &self.course_id {
            next.course_id = course_id.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(enrolled_on) = &self.enrolled_on {
            next.enrolled_on = enrolled_on.clone();
        }
        if let Some(notes) = &self.notes {
            next.notes = notes.clone();
        }
        next
    }
}
