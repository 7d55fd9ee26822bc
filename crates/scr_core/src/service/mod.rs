//! Use-case helpers layered over the entity store.
//!
//! # Responsibility
//! - Resolve free-text student names into student records.
//! - Build joined enrollment and roster rows for table views.

pub mod roster;
pub mod student_directory;
