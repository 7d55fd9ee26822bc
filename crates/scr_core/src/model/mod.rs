//! Registration domain model.
//!
//! # Responsibility
//! - Define the canonical student, course and enrollment records.
//! - Define create inputs and the partial enrollment patch.
//!
//! # Invariants
//! - Every record is identified by an opaque, never-reused `EntityId`.
//! - Serialized field names match the persisted blob (camelCase).

pub mod course;
pub mod enrollment;
pub mod id;
mod lenient;
pub mod student;
