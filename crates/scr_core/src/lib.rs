//! Core data layer for student course registration.
//! This crate is the single source of truth for registration invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod service;
pub mod store;

pub use config::StoreOptions;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, NewCourse};
pub use model::enrollment::{Enrollment, EnrollmentPatch, EnrollmentStatus, NewEnrollment};
pub use model::id::{EntityId, IdStrategy};
pub use model::student::{NewStudent, Student};
pub use persistence::{
    KeyValueSlot, LoadOutcome, PersistenceAdapter, PersistenceError, PersistenceResult,
    SqliteKeyValueSlot, STORAGE_KEY,
};
pub use service::roster::{course_roster, enrollment_rows, EnrollmentRow, RosterEntry};
pub use service::student_directory::{ensure_student_by_name, DirectoryError};
pub use store::error::{ReferenceKind, StoreError, StoreResult};
pub use store::registration_store::RegistrationStore;
pub use store::state::RegistrationState;

/// Minimal health-check API for smoke probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
