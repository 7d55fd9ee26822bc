//! Registration entity store.
//!
//! # Responsibility
//! - Provide list/create/update/delete entry points over the three
//!   collections.
//! - Persist the full state through the injected adapter after every
//!   successful mutation.
//!
//! # Invariants
//! - Student emails are unique ignoring case; `create_student` is
//!   create-or-get.
//! - Enrollment `(student_id, course_id)` pairs are unique.
//! - Enrollment references are checked on create. Updates are only checked
//!   when `StoreOptions::revalidate_updates` is set.

use crate::config::StoreOptions;
use crate::model::course::{Course, NewCourse};
use crate::model::enrollment::{Enrollment, EnrollmentPatch, NewEnrollment};
use crate::model::id::EntityId;
use crate::model::student::{NewStudent, Student};
use crate::persistence::{LoadOutcome, PersistenceAdapter};
use crate::store::error::{ReferenceKind, StoreError, StoreResult};
use crate::store::seed::{demo_state, today_utc};
use crate::store::state::RegistrationState;
use log::{debug, info, warn};

/// In-memory registration store backed by a persistence adapter.
///
/// Construct one per application and pass it by reference to consumers.
pub struct RegistrationStore {
    state: RegistrationState,
    persistence: PersistenceAdapter,
    options: StoreOptions,
}

impl RegistrationStore {
    /// Opens a store, rehydrating from `persistence` or seeding.
    ///
    /// # Side effects
    /// - Seeds and persists the demo dataset when the slot is empty, invalid
    ///   or unreadable and `options.seed` is set.
    /// - Emits a `store_open` log event with the state source.
    pub fn open(persistence: PersistenceAdapter, options: StoreOptions) -> Self {
        let mut store = Self {
            state: RegistrationState::default(),
            persistence,
            options,
        };

        let source = match store.persistence.load() {
            LoadOutcome::Loaded(state) => {
                store.state = state;
                "slot"
            }
            LoadOutcome::Missing | LoadOutcome::Invalid(_) | LoadOutcome::Unavailable
                if options.seed =>
            {
                store.state = demo_state(options.id_strategy, &today_utc());
                store.persist();
                "seed"
            }
            _ => "empty",
        };

        info!(
            "event=store_open module=store status=ok source={} durable={} students={} courses={} enrollments={}",
            source,
            store.persistence.is_durable(),
            store.state.students.len(),
            store.state.courses.len(),
            store.state.enrollments.len()
        );
        store
    }

    /// Opens a store with no durable medium.
    pub fn in_memory(options: StoreOptions) -> Self {
        Self::open(PersistenceAdapter::headless(), options)
    }

    /// Returns a copy of the full state.
    pub fn snapshot(&self) -> RegistrationState {
        self.state.clone()
    }

    pub fn list_students(&self) -> Vec<Student> {
        self.state.students.clone()
    }

    pub fn list_courses(&self) -> Vec<Course> {
        self.state.courses.clone()
    }

    pub fn list_enrollments(&self) -> Vec<Enrollment> {
        self.state.enrollments.clone()
    }

    pub fn find_student(&self, id: &EntityId) -> Option<&Student> {
        self.state.students.iter().find(|student| &student.id == id)
    }

    pub fn find_course(&self, id: &EntityId) -> Option<&Course> {
        self.state.courses.iter().find(|course| &course.id == id)
    }

    pub fn find_enrollment(&self, id: &EntityId) -> Option<&Enrollment> {
        self.state
            .enrollments
            .iter()
            .find(|enrollment| &enrollment.id == id)
    }

    /// Creates a student, or returns the one already holding `input.email`.
    ///
    /// # Contract
    /// - Email match ignores case; the existing record wins and nothing is
    ///   persisted.
    pub fn create_student(&mut self, input: NewStudent) -> Student {
        if let Some(existing) = self
            .state
            .students
            .iter()
            .find(|student| student.has_email(&input.email))
        {
            debug!(
                "event=student_create module=store status=ok existing=true student_id={}",
                existing.id
            );
            return existing.clone();
        }

        let student = Student {
            id: self.options.id_strategy.generate(),
            name: input.name,
            email: input.email,
        };
        self.state.students.push(student.clone());
        self.persist();
        info!(
            "event=student_create module=store status=ok existing=false student_id={}",
            student.id
        );
        student
    }

    /// Creates a course with a fresh id. Codes are not checked for duplicates.
    pub fn create_course(&mut self, input: NewCourse) -> Course {
        let course = Course {
            id: self.options.id_strategy.generate(),
            code: input.code,
            title: input.title,
            credits: input.credits,
        };
        self.state.courses.push(course.clone());
        self.persist();
        info!(
            "event=course_create module=store status=ok course_id={}",
            course.id
        );
        course
    }

    /// Creates an enrollment after reference and uniqueness checks.
    ///
    /// # Errors
    /// - `ReferenceNotFound` when the student (checked first) or course is
    ///   missing.
    /// - `DuplicateEnrollment` when the pair is already enrolled.
    pub fn create_enrollment(&mut self, input: NewEnrollment) -> StoreResult<Enrollment> {
        let check = self
            .check_references(&input.student_id, &input.course_id)
            .and_then(|()| self.check_unique_pair(&input.student_id, &input.course_id, None));
        if let Err(err) = check {
            warn!(
                "event=enrollment_create module=store status=error error_code={}",
                err.code()
            );
            return Err(err);
        }

        let enrollment = Enrollment {
            id: self.options.id_strategy.generate(),
            student_id: input.student_id,
            course_id: input.course_id,
            status: input.status,
            enrolled_on: input.enrolled_on,
            notes: input.notes,
        };
        self.state.enrollments.push(enrollment.clone());
        self.persist();
        info!(
            "event=enrollment_create module=store status=ok enrollment_id={}",
            enrollment.id
        );
        Ok(enrollment)
    }

    /// Shallow-merges `patch` onto the enrollment with `patch.id`.
    ///
    /// # Errors
    /// - `NotFound` when no enrollment has `patch.id`.
    /// - With `revalidate_updates`, the same errors as `create_enrollment`
    ///   for the merged record.
    pub fn update_enrollment(&mut self, patch: EnrollmentPatch) -> StoreResult<Enrollment> {
        let Some(index) = self.position_of(&patch.id) else {
            warn!("event=enrollment_update module=store status=error error_code=not_found");
            return Err(StoreError::NotFound(patch.id));
        };

        let next = patch.merge_onto(&self.state.enrollments[index]);
        if self.options.revalidate_updates {
            let check = self
                .check_references(&next.student_id, &next.course_id)
                .and_then(|()| {
                    self.check_unique_pair(&next.student_id, &next.course_id, Some(&next.id))
                });
            if let Err(err) = check {
                warn!(
                    "event=enrollment_update module=store status=error error_code={}",
                    err.code()
                );
                return Err(err);
            }
        }

        self.state.enrollments[index] = next.clone();
        self.persist();
        info!(
            "event=enrollment_update module=store status=ok enrollment_id={}",
            next.id
        );
        Ok(next)
    }

    /// Removes the enrollment with `id`.
    ///
    /// # Errors
    /// - `NotFound` when no enrollment has `id`.
    pub fn delete_enrollment(&mut self, id: &EntityId) -> StoreResult<()> {
        let Some(index) = self.position_of(id) else {
            warn!("event=enrollment_delete module=store status=error error_code=not_found");
            return Err(StoreError::NotFound(id.clone()));
        };

        self.state.enrollments.remove(index);
        self.persist();
        info!("event=enrollment_delete module=store status=ok enrollment_id={id}");
        Ok(())
    }

    fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.state
            .enrollments
            .iter()
            .position(|enrollment| &enrollment.id == id)
    }

    fn check_references(&self, student_id: &EntityId, course_id: &EntityId) -> StoreResult<()> {
        if self.find_student(student_id).is_none() {
            return Err(StoreError::ReferenceNotFound {
                kind: ReferenceKind::Student,
                id: student_id.clone(),
            });
        }
        if self.find_course(course_id).is_none() {
            return Err(StoreError::ReferenceNotFound {
                kind: ReferenceKind::Course,
                id: course_id.clone(),
            });
        }
        Ok(())
    }

    fn check_unique_pair(
        &self,
        student_id: &EntityId,
        course_id: &EntityId,
        ignore: Option<&EntityId>,
    ) -> StoreResult<()> {
        let taken = self.state.enrollments.iter().any(|enrollment| {
            Some(&enrollment.id) != ignore
                && &enrollment.student_id == student_id
                && &enrollment.course_id == course_id
        });
        if taken {
            return Err(StoreError::DuplicateEnrollment {
                student_id: student_id.clone(),
                course_id: course_id.clone(),
            });
        }
        Ok(())
    }

    fn persist(&self) {
        self.persistence.save(&self.state);
    }
}
