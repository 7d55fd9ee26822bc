use scr_core::{
    EnrollmentPatch, EnrollmentStatus, KeyValueSlot, NewCourse, NewEnrollment, NewStudent,
    PersistenceAdapter, PersistenceError, PersistenceResult, RegistrationStore,
    SqliteKeyValueSlot, StoreOptions, STORAGE_KEY,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

fn open_file_store(path: &Path, options: StoreOptions) -> RegistrationStore {
    let slot = SqliteKeyValueSlot::open(path).unwrap();
    RegistrationStore::open(PersistenceAdapter::new(slot), options)
}

fn stored_blob(path: &Path) -> Option<String> {
    SqliteKeyValueSlot::open(path).unwrap().read(STORAGE_KEY).unwrap()
}

fn write_blob(path: &Path, value: &str) {
    SqliteKeyValueSlot::open(path)
        .unwrap()
        .write(STORAGE_KEY, value)
        .unwrap();
}

#[test]
fn reopening_reproduces_identical_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");

    let before = {
        let mut store = open_file_store(&path, StoreOptions::unseeded());
        let student = store.create_student(NewStudent::new("Carol Smith", "carol@student.edu"));
        let course = store.create_course(NewCourse::new("CSC101", "Intro to CS", Some(3)));
        let untitled = store.create_course(NewCourse::new("SEM000", "Seminar", None));
        let enrollment = store
            .create_enrollment(NewEnrollment {
                student_id: student.id.clone(),
                course_id: course.id.clone(),
                status: EnrollmentStatus::Active,
                enrolled_on: "2024-01-10".to_string(),
                notes: Some("Needs lab access".to_string()),
            })
            .unwrap();
        store
            .create_enrollment(NewEnrollment {
                student_id: student.id,
                course_id: untitled.id,
                status: EnrollmentStatus::Dropped,
                enrolled_on: "2024-01-11".to_string(),
                notes: None,
            })
            .unwrap();
        store
            .update_enrollment(EnrollmentPatch {
                status: Some(EnrollmentStatus::Completed),
                ..EnrollmentPatch::new(enrollment.id)
            })
            .unwrap();
        store.snapshot()
    };

    let reopened = open_file_store(&path, StoreOptions::default());
    assert_eq!(reopened.snapshot(), before);
}

#[test]
fn empty_slot_is_seeded_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");

    let seeded = open_file_store(&path, StoreOptions::default()).snapshot();
    assert_eq!(seeded.students.len(), 2);

    let blob = stored_blob(&path).expect("seed should be persisted");
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["courses"].as_array().unwrap().len(), 7);

    let reopened = open_file_store(&path, StoreOptions::default());
    assert_eq!(reopened.snapshot(), seeded);
}

#[test]
fn unseeded_empty_slot_starts_empty_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");

    let store = open_file_store(&path, StoreOptions::unseeded());
    assert!(store.snapshot().is_empty());
    assert_eq!(stored_blob(&path), None);
}

#[test]
fn corrupt_json_triggers_reseed_and_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");
    write_blob(&path, "{definitely not json");

    let store = open_file_store(&path, StoreOptions::default());
    assert_eq!(store.list_courses().len(), 7);

    let blob = stored_blob(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&blob).is_ok());
}

#[test]
fn structurally_invalid_blob_triggers_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");
    write_blob(
        &path,
        r#"{"students":[],"courses":"CSC101","enrollments":[]}"#,
    );

    let store = open_file_store(&path, StoreOptions::default());
    assert_eq!(store.list_students().len(), 2);
}

#[test]
fn invalid_blob_is_left_alone_when_seeding_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");
    write_blob(&path, "[]");

    let store = open_file_store(&path, StoreOptions::unseeded());
    assert!(store.snapshot().is_empty());
    assert_eq!(stored_blob(&path).as_deref(), Some("[]"));
}

#[test]
fn plausible_blob_with_missing_entry_fields_loads_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");
    write_blob(
        &path,
        r#"{
            "students": [{"id": "s1", "name": "Legacy"}],
            "courses": [{"id": "c1", "code": "CSC101", "title": "Intro"}],
            "enrollments": [{"id": "e1", "studentId": "s1", "courseId": "c1"}]
        }"#,
    );

    let store = open_file_store(&path, StoreOptions::default());
    let state = store.snapshot();
    assert_eq!(state.students.len(), 1);
    assert_eq!(state.students[0].email, "");
    assert_eq!(state.courses[0].credits, None);
    assert_eq!(state.enrollments[0].status, EnrollmentStatus::Active);
    assert_eq!(state.enrollments[0].enrolled_on, "");
}

#[test]
fn shape_valid_blob_with_odd_entries_is_kept_and_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scr.sqlite3");
    let blob = r#"{
        "students": [{"id": "s1", "name": "Dana", "email": "dana@student.edu"}],
        "courses": [{"id": 9, "code": "CSC101", "title": "Intro", "credits": 1.5}],
        "enrollments": [{
            "id": "e1",
            "studentId": "s1",
            "courseId": 9,
            "status": "Pending",
            "enrolledOn": "2024-01-10"
        }]
    }"#;
    write_blob(&path, blob);

    let store = open_file_store(&path, StoreOptions::default());
    let names: Vec<String> = store.list_students().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Dana"]);

    let course = &store.list_courses()[0];
    assert_eq!(course.id.as_str(), "9");
    assert_eq!(course.credits, None);

    let enrollment = &store.list_enrollments()[0];
    assert_eq!(enrollment.status, EnrollmentStatus::Active);
    assert_eq!(enrollment.course_id, course.id);

    assert_eq!(stored_blob(&path).as_deref(), Some(blob));
}

struct FailingSlot {
    writes: Rc<RefCell<u32>>,
}

impl KeyValueSlot for FailingSlot {
    fn read(&self, _key: &str) -> PersistenceResult<Option<String>> {
        Err(PersistenceError::Backend("storage unavailable".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> PersistenceResult<()> {
        *self.writes.borrow_mut() += 1;
        Err(PersistenceError::Backend("quota exceeded".to_string()))
    }
}

#[test]
fn persistence_failures_are_swallowed_and_observed() {
    let writes = Rc::new(RefCell::new(0));
    let observed = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&observed);
    let adapter = PersistenceAdapter::new(FailingSlot {
        writes: Rc::clone(&writes),
    })
    .with_observer(move |err| sink.borrow_mut().push(err.to_string()));

    let mut store = RegistrationStore::open(adapter, StoreOptions::default());
    assert_eq!(store.list_students().len(), 2);

    let student = store.create_student(NewStudent::new("Erin", "erin@student.edu"));
    assert_eq!(store.find_student(&student.id), Some(&student));

    assert_eq!(*writes.borrow(), 2);
    let observed = observed.borrow();
    assert_eq!(observed.len(), 3);
    assert!(observed[0].contains("storage unavailable"));
    assert!(observed[1..].iter().all(|msg| msg.contains("quota exceeded")));
}

#[test]
fn headless_adapter_keeps_state_in_memory_only() {
    let adapter = PersistenceAdapter::headless();
    assert!(!adapter.is_durable());

    let mut store = RegistrationStore::open(adapter, StoreOptions::unseeded());
    store.create_course(NewCourse::new("STA150", "Statistics I", Some(3)));
    assert_eq!(store.list_courses().len(), 1);
}
