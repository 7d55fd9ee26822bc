//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `scr_core` linkage and print the registration tables.
//! - Map `SCR_*` environment variables onto store configuration.
//!
//! # Environment
//! - `SCR_DB_PATH`: slot database file; unset runs headless in memory.
//! - `SCR_SEED`: `0|false|no|off` disables the demo dataset.
//! - `SCR_STATUS`: `active|completed|dropped` filters the enrollment table.
//! - `SCR_LOG_DIR` / `SCR_LOG_LEVEL`: enable file logging.

use scr_core::{
    course_roster, default_log_level, enrollment_rows, init_logging, EnrollmentStatus,
    PersistenceAdapter, RegistrationStore, SqliteKeyValueSlot, StoreOptions,
};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("scr_core ping={}", scr_core::ping());
    println!("scr_core version={}", scr_core::core_version());

    if let Ok(log_dir) = env::var("SCR_LOG_DIR") {
        let level = env::var("SCR_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let status = match env::var("SCR_STATUS") {
        Ok(value) => match status_filter(&value) {
            Ok(status) => status,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => None,
    };

    let options = StoreOptions {
        seed: env::var("SCR_SEED").map_or(true, |value| seed_enabled(&value)),
        ..StoreOptions::default()
    };

    let persistence = match env::var("SCR_DB_PATH") {
        Ok(path) => match SqliteKeyValueSlot::open(&path) {
            Ok(slot) => PersistenceAdapter::new(slot).with_observer(|err| {
                log::warn!("event=cli_persist module=cli status=error error={err}");
            }),
            Err(err) => {
                eprintln!("failed to open `{path}`: {err}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => PersistenceAdapter::headless(),
    };

    let store = RegistrationStore::open(persistence, options);
    print_enrollments(&store, status);
    print_rosters(&store);
    ExitCode::SUCCESS
}

fn seed_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Maps `SCR_STATUS` onto a filter; `all` or blank means no filter.
fn status_filter(value: &str) -> Result<Option<EnrollmentStatus>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    EnrollmentStatus::parse(trimmed).map(Some).ok_or_else(|| {
        format!("unsupported SCR_STATUS `{trimmed}`; expected all|active|completed|dropped")
    })
}

fn print_enrollments(store: &RegistrationStore, status: Option<EnrollmentStatus>) {
    println!();
    println!("{:<24} {:<32} {:<10} {:<11} Notes", "Student", "Course", "Status", "Enrolled");
    for row in enrollment_rows(store, status) {
        println!(
            "{:<24} {:<32} {:<10} {:<11} {}",
            row.student.map(|s| s.name).unwrap_or_default(),
            row.course.map(|c| c.title).unwrap_or_default(),
            row.enrollment.status.label(),
            row.enrollment.enrolled_on,
            row.enrollment.notes.as_deref().unwrap_or("-"),
        );
    }
}

fn print_rosters(store: &RegistrationStore) {
    for course in store.list_courses() {
        let roster = course_roster(store, &course.id);
        println!();
        println!("{} {} ({} enrolled)", course.code, course.title, roster.len());
        if roster.is_empty() {
            println!("  No students enrolled yet.");
        }
        for entry in roster {
            println!(
                "  {:<24} {:<10} {}",
                entry.student.name,
                entry.enrollment.status.label(),
                entry.enrollment.enrolled_on
            );
        }
    }
}
