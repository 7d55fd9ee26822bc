//! Joined read models for enrollment tables and course rosters.

use crate::model::course::Course;
use crate::model::enrollment::{Enrollment, EnrollmentStatus};
use crate::model::id::EntityId;
use crate::model::student::Student;
use crate::store::registration_store::RegistrationStore;

/// One enrollment with its student and course resolved when they exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRow {
    pub enrollment: Enrollment,
    pub student: Option<Student>,
    pub course: Option<Course>,
}

/// One student registered for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub student: Student,
    pub enrollment: Enrollment,
}

/// Lists enrollments in store order, optionally restricted to one status.
///
/// Rows whose student or course was never resolvable are kept with `None`
/// so dangling references stay visible.
pub fn enrollment_rows(
    store: &RegistrationStore,
    status: Option<EnrollmentStatus>,
) -> Vec<EnrollmentRow> {
    store
        .list_enrollments()
        .into_iter()
        .filter(|enrollment| status.map_or(true, |wanted| enrollment.status == wanted))
        .map(|enrollment| EnrollmentRow {
            student: store.find_student(&enrollment.student_id).cloned(),
            course: store.find_course(&enrollment.course_id).cloned(),
            enrollment,
        })
        .collect()
}

/// Lists students registered for `course_id`, skipping unknown students.
pub fn course_roster(store: &RegistrationStore, course_id: &EntityId) -> Vec<RosterEntry> {
    store
        .list_enrollments()
        .into_iter()
        .filter(|enrollment| &enrollment.course_id == course_id)
        .filter_map(|enrollment| {
            store
                .find_student(&enrollment.student_id)
                .cloned()
                .map(|student| RosterEntry {
                    student,
                    enrollment,
                })
        })
        .collect()
}
