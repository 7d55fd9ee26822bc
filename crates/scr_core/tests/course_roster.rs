use scr_core::{
    course_roster, enrollment_rows, ensure_student_by_name, DirectoryError, EnrollmentPatch,
    EnrollmentStatus, EntityId, NewCourse, NewEnrollment, NewStudent, RegistrationStore,
    StoreOptions,
};

fn empty_store() -> RegistrationStore {
    RegistrationStore::in_memory(StoreOptions::unseeded())
}

fn enroll(
    store: &mut RegistrationStore,
    student_id: &EntityId,
    course_id: &EntityId,
    status: EnrollmentStatus,
) -> EntityId {
    store
        .create_enrollment(NewEnrollment {
            student_id: student_id.clone(),
            course_id: course_id.clone(),
            status,
            enrolled_on: "2024-02-01".to_string(),
            notes: None,
        })
        .unwrap()
        .id
}

#[test]
fn ensure_student_creates_with_slug_email() {
    let mut store = empty_store();

    let carol = ensure_student_by_name(&mut store, "  Carol Smith ").unwrap();
    assert_eq!(carol.name, "Carol Smith");
    assert_eq!(carol.email, "carol.smith@student.edu");
    assert_eq!(store.list_students(), vec![carol]);
}

#[test]
fn ensure_student_reuses_existing_name_ignoring_case() {
    let mut store = empty_store();
    let existing = store.create_student(NewStudent::new("Carol Smith", "cs@registrar.edu"));

    let found = ensure_student_by_name(&mut store, "carol smith").unwrap();
    assert_eq!(found, existing);
    assert_eq!(store.list_students().len(), 1);
}

#[test]
fn ensure_student_suffixes_colliding_email() {
    let mut store = empty_store();
    store.create_student(NewStudent::new("Someone Else", "carol.smith@student.edu"));

    let carol = ensure_student_by_name(&mut store, "Carol Smith").unwrap();
    assert_eq!(carol.email, "carol.smith1@student.edu");
    assert_eq!(store.list_students().len(), 2);
}

#[test]
fn ensure_student_rejects_blank_name() {
    let mut store = empty_store();
    assert_eq!(
        ensure_student_by_name(&mut store, "   ").unwrap_err(),
        DirectoryError::EmptyName
    );
    assert!(store.list_students().is_empty());
}

#[test]
fn enrollment_rows_filter_by_status() {
    let mut store = empty_store();
    let ann = store.create_student(NewStudent::new("Ann", "ann@student.edu"));
    let csc = store.create_course(NewCourse::new("CSC101", "Intro to CS", Some(3)));
    let mat = store.create_course(NewCourse::new("MAT201", "Discrete Mathematics", Some(4)));
    enroll(&mut store, &ann.id, &csc.id, EnrollmentStatus::Active);
    let dropped = enroll(&mut store, &ann.id, &mat.id, EnrollmentStatus::Dropped);

    assert_eq!(enrollment_rows(&store, None).len(), 2);

    let rows = enrollment_rows(&store, Some(EnrollmentStatus::Dropped));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].enrollment.id, dropped);
    assert_eq!(rows[0].student.as_ref().map(|s| s.name.as_str()), Some("Ann"));
    assert_eq!(
        rows[0].course.as_ref().map(|c| c.title.as_str()),
        Some("Discrete Mathematics")
    );

    assert!(enrollment_rows(&store, Some(EnrollmentStatus::Completed)).is_empty());
}

#[test]
fn course_roster_lists_enrolled_students_only() {
    let mut store = empty_store();
    let ann = store.create_student(NewStudent::new("Ann", "ann@student.edu"));
    let ben = store.create_student(NewStudent::new("Ben", "ben@student.edu"));
    let csc = store.create_course(NewCourse::new("CSC101", "Intro to CS", Some(3)));
    let his = store.create_course(NewCourse::new("HIS210", "World History", Some(3)));
    enroll(&mut store, &ann.id, &csc.id, EnrollmentStatus::Active);
    enroll(&mut store, &ben.id, &csc.id, EnrollmentStatus::Completed);
    let stray = enroll(&mut store, &ben.id, &his.id, EnrollmentStatus::Active);

    let names: Vec<String> = course_roster(&store, &csc.id)
        .into_iter()
        .map(|entry| entry.student.name)
        .collect();
    assert_eq!(names, ["Ann", "Ben"]);

    // A record re-pointed at an unknown student drops out of the roster.
    store
        .update_enrollment(EnrollmentPatch {
            student_id: Some(EntityId::from("ghost")),
            ..EnrollmentPatch::new(stray)
        })
        .unwrap();
    assert!(course_roster(&store, &his.id).is_empty());
    assert!(course_roster(&store, &EntityId::from("no-course")).is_empty());
}
