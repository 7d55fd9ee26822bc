//! Persistence adapter: durable round-trip of the full registration state.
//!
//! # Responsibility
//! - Read one serialized blob from a fixed key at store construction.
//! - Write the full state back to that key after every mutation.
//!
//! # Invariants
//! - A blob is accepted only when it is a JSON object holding array-valued
//!   `students`, `courses` and `enrollments` fields.
//! - Once the top-level shape is valid the blob is always loaded: entry
//!   fields decode leniently and non-object entries are skipped, so a
//!   shape-valid blob never triggers a reseed.
//! - Write failures never reach store callers; they are logged and handed
//!   to the optional observer.

use crate::db::DbError;
use crate::store::state::RegistrationState;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_slot;

pub use sqlite_slot::SqliteKeyValueSlot;

/// Namespaced key holding the serialized state.
pub const STORAGE_KEY: &str = "scr.orm.v1";

const COLLECTION_FIELDS: [(&str, &str); 3] = [
    ("students", "`students` is missing or not an array"),
    ("courses", "`courses` is missing or not an array"),
    ("enrollments", "`enrollments` is missing or not an array"),
];

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while reading, decoding, encoding or writing the state blob.
#[derive(Debug)]
pub enum PersistenceError {
    /// Slot database failure.
    Storage(DbError),
    /// Blob is not valid JSON or entries have the wrong JSON types.
    Decode(serde_json::Error),
    /// State could not be serialized.
    Encode(serde_json::Error),
    /// Blob parsed but is not the expected three-collection object.
    InvalidShape(&'static str),
    /// Failure reported by a custom slot implementation.
    Backend(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "slot storage error: {err}"),
            Self::Decode(err) => write!(f, "failed to decode persisted state: {err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
            Self::InvalidShape(details) => write!(f, "invalid persisted state shape: {details}"),
            Self::Backend(message) => write!(f, "slot backend error: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::InvalidShape(_) | Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Durable string key-value medium.
///
/// Implementations should be synchronous and local; the store calls `write`
/// once per mutation.
pub trait KeyValueSlot {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> PersistenceResult<()>;
}

/// Result of reading the slot at store construction.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A structurally valid blob was found.
    Loaded(RegistrationState),
    /// The slot holds no value yet.
    Missing,
    /// The read failed or the blob was unusable.
    Invalid(PersistenceError),
    /// No durable medium is configured.
    Unavailable,
}

type Observer = Box<dyn Fn(&PersistenceError)>;

/// Best-effort bridge between the entity store and a `KeyValueSlot`.
pub struct PersistenceAdapter {
    slot: Option<Box<dyn KeyValueSlot>>,
    observer: Option<Observer>,
}

impl PersistenceAdapter {
    /// Creates an adapter writing to `slot` under `STORAGE_KEY`.
    pub fn new(slot: impl KeyValueSlot + 'static) -> Self {
        Self {
            slot: Some(Box::new(slot)),
            observer: None,
        }
    }

    /// Creates a no-op adapter for contexts without durable storage.
    pub fn headless() -> Self {
        Self {
            slot: None,
            observer: None,
        }
    }

    /// Registers a callback invoked for every swallowed read or write failure.
    pub fn with_observer(mut self, observer: impl Fn(&PersistenceError) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns whether a durable medium is attached.
    pub fn is_durable(&self) -> bool {
        self.slot.is_some()
    }

    /// Reads and decodes the stored state.
    pub fn load(&self) -> LoadOutcome {
        let Some(slot) = self.slot.as_deref() else {
            return LoadOutcome::Unavailable;
        };

        let outcome = match slot.read(STORAGE_KEY) {
            Ok(None) => LoadOutcome::Missing,
            Ok(Some(raw)) => match decode_state(&raw) {
                Ok(state) => LoadOutcome::Loaded(state),
                Err(err) => LoadOutcome::Invalid(err),
            },
            Err(err) => LoadOutcome::Invalid(err),
        };

        if let LoadOutcome::Invalid(err) = &outcome {
            warn!("event=state_load module=persistence status=error error={err}");
            self.notify(err);
        }
        outcome
    }

    /// Serializes `state` and writes it to the slot.
    ///
    /// Failures are logged and reported to the observer, never returned.
    pub fn save(&self, state: &RegistrationState) {
        let Some(slot) = self.slot.as_deref() else {
            return;
        };

        let result = encode_state(state).and_then(|payload| slot.write(STORAGE_KEY, &payload));
        match result {
            Ok(()) => debug!(
                "event=state_save module=persistence status=ok students={} courses={} enrollments={}",
                state.students.len(),
                state.courses.len(),
                state.enrollments.len()
            ),
            Err(err) => {
                warn!("event=state_save module=persistence status=error error={err}");
                self.notify(&err);
            }
        }
    }

    fn notify(&self, err: &PersistenceError) {
        if let Some(observer) = &self.observer {
            observer(err);
        }
    }
}

/// Serializes the full state as the persisted JSON blob.
pub fn encode_state(state: &RegistrationState) -> PersistenceResult<String> {
    serde_json::to_string(state).map_err(PersistenceError::Encode)
}

/// Parses a persisted blob, checking only the top-level shape.
///
/// # Errors
/// - `Decode` when `raw` is not JSON.
/// - `InvalidShape` when the three array-valued collections are missing.
pub fn decode_state(raw: &str) -> PersistenceResult<RegistrationState> {
    let value: Value = serde_json::from_str(raw).map_err(PersistenceError::Decode)?;
    let Some(object) = value.as_object() else {
        return Err(PersistenceError::InvalidShape("top-level value is not an object"));
    };
    for (field, problem) in COLLECTION_FIELDS {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(PersistenceError::InvalidShape(problem));
        }
    }

    Ok(RegistrationState {
        students: decode_entries(object, "students"),
        courses: decode_entries(object, "courses"),
        enrollments: decode_entries(object, "enrollments"),
    })
}

fn decode_entries<T: DeserializeOwned>(object: &Map<String, Value>, field: &str) -> Vec<T> {
    let Some(entries) = object.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let decoded: Option<T> = match entry {
                Value::Object(_) => serde::Deserialize::deserialize(entry).ok(),
                _ => None,
            };
            if decoded.is_none() {
                warn!(
                    "event=state_load module=persistence status=skip collection={field} index={index}"
                );
            }
            decoded
        })
        .collect()
}
