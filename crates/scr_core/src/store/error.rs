//! Store operation errors.

use crate::model::id::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Which collection a dangling reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Student,
    Course,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Course => "course",
        }
    }

    /// Enrollment field holding the reference.
    pub fn field(self) -> &'static str {
        match self {
            Self::Student => "studentId",
            Self::Course => "courseId",
        }
    }
}

/// Synchronous failure raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An enrollment names a student or course that does not exist.
    ReferenceNotFound { kind: ReferenceKind, id: EntityId },
    /// The student already has an enrollment for the course.
    DuplicateEnrollment {
        student_id: EntityId,
        course_id: EntityId,
    },
    /// No enrollment has the given id.
    NotFound(EntityId),
}

impl StoreError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReferenceNotFound { .. } => "reference_not_found",
            Self::DuplicateEnrollment { .. } => "duplicate_enrollment",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceNotFound { kind, id } => {
                write!(f, "{} not found for {}: {id}", kind.as_str(), kind.field())
            }
            Self::DuplicateEnrollment {
                student_id,
                course_id,
            } => write!(
                f,
                "student {student_id} already enrolled in course {course_id}"
            ),
            Self::NotFound(id) => write!(f, "enrollment not found: {id}"),
        }
    }
}

impl Error for StoreError {}
