//! Student lookup by display name.
//!
//! # Invariants
//! - Name matches ignore surrounding whitespace and case.
//! - Generated emails are unique among existing students.

use crate::model::student::{NewStudent, Student};
use crate::store::registration_store::RegistrationStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain used for generated student emails.
pub const STUDENT_EMAIL_DOMAIN: &str = "student.edu";

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid non-alnum regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Name is empty after trimming.
    EmptyName,
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "student name cannot be empty"),
        }
    }
}

impl Error for DirectoryError {}

/// Returns the student named `name`, creating one when none matches.
///
/// New students get a slug email such as `carol.smith@student.edu`; on
/// collision a numeric suffix is appended (`carol.smith1@...`).
pub fn ensure_student_by_name(
    store: &mut RegistrationStore,
    name: &str,
) -> Result<Student, DirectoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::EmptyName);
    }

    let wanted = trimmed.to_lowercase();
    let students = store.list_students();
    if let Some(found) = students
        .iter()
        .find(|student| student.name.trim().to_lowercase() == wanted)
    {
        return Ok(found.clone());
    }

    let taken: HashSet<String> = students
        .iter()
        .map(|student| student.email.to_lowercase())
        .collect();
    let email = unique_email(&email_slug(trimmed), &taken);
    Ok(store.create_student(NewStudent::new(trimmed, email)))
}

/// Derives the local part of a generated email from a display name.
///
/// Non-alphanumeric runs collapse to `.`; an empty result falls back to
/// `student`.
pub fn email_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let spaced = NON_ALNUM_RE.replace_all(&lowered, " ");
    let slug = WHITESPACE_RE.replace_all(spaced.trim(), ".");
    if slug.is_empty() {
        "student".to_string()
    } else {
        slug.into_owned()
    }
}

fn unique_email(slug: &str, taken: &HashSet<String>) -> String {
    let mut email = format!("{slug}@{STUDENT_EMAIL_DOMAIN}");
    let mut suffix = 1u32;
    while taken.contains(&email) {
        email = format!("{slug}{suffix}@{STUDENT_EMAIL_DOMAIN}");
        suffix += 1;
    }
    email
}
