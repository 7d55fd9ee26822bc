//! Entity store: in-memory collections plus registration invariants.
//!
//! # Responsibility
//! - Own the student, course and enrollment collections.
//! - Enforce email uniqueness, enrollment references and pair uniqueness.
//! - Hand the full state to the persistence adapter after each mutation.
//!
//! # Invariants
//! - List operations return snapshots; callers never alias store state.
//! - A failed operation leaves every collection unchanged.

pub mod error;
pub mod registration_store;
pub mod seed;
pub mod state;
