//! Fixed demo dataset used when no usable state is stored.

use crate::model::course::Course;
use crate::model::enrollment::{Enrollment, EnrollmentStatus};
use crate::model::id::IdStrategy;
use crate::model::student::Student;
use crate::store::state::RegistrationState;

const SEED_STUDENTS: [(&str, &str); 2] = [
    ("Alice Johnson", "alice@student.edu"),
    ("Bob Lee", "bob@student.edu"),
];

const SEED_COURSES: [(&str, &str, u32); 7] = [
    ("CSC101", "Intro to Computer Science", 3),
    ("MAT201", "Discrete Mathematics", 4),
    ("PHY101", "Physics I", 4),
    ("ENG102", "Academic Writing", 2),
    ("HIS210", "World History", 3),
    ("CSC202", "Data Structures", 4),
    ("STA150", "Statistics I", 3),
];

/// Builds the demo dataset with every enrollment dated `enrolled_on`.
///
/// Two students, seven courses, and two active enrollments: Alice in
/// CSC101 (with a lab-access note) and Bob in MAT201.
pub fn demo_state(ids: IdStrategy, enrolled_on: &str) -> RegistrationState {
    let students: Vec<Student> = SEED_STUDENTS
        .iter()
        .map(|(name, email)| Student {
            id: ids.generate(),
            name: (*name).to_string(),
            email: (*email).to_string(),
        })
        .collect();

    let courses: Vec<Course> = SEED_COURSES
        .iter()
        .map(|(code, title, credits)| Course {
            id: ids.generate(),
            code: (*code).to_string(),
            title: (*title).to_string(),
            credits: Some(*credits),
        })
        .collect();

    let enrollments = vec![
        Enrollment {
            id: ids.generate(),
            student_id: students[0].id.clone(),
            course_id: courses[0].id.clone(),
            status: EnrollmentStatus::Active,
            enrolled_on: enrolled_on.to_string(),
            notes: Some("Needs lab access".to_string()),
        },
        Enrollment {
            id: ids.generate(),
            student_id: students[1].id.clone(),
            course_id: courses[1].id.clone(),
            status: EnrollmentStatus::Active,
            enrolled_on: enrolled_on.to_string(),
            notes: None,
        },
    ];

    RegistrationState {
        students,
        courses,
        enrollments,
    }
}

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
