//! Serializable store state.

use crate::model::course::Course;
use crate::model::enrollment::Enrollment;
use crate::model::student::Student;
use serde::{Deserialize, Serialize};

/// The three collections, in insertion order.
///
/// This is also the persisted blob shape:
/// `{ "students": [...], "courses": [...], "enrollments": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

impl RegistrationState {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty() && self.enrollments.is_empty()
    }
}
