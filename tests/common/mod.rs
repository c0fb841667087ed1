//! Shared test utilities for store integration tests

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use studyflow::domain::{Priority, SessionDraft, SessionKind};
use studyflow::store::{Storage, Store};

/// Creates a store backed by a temporary data directory
pub fn create_test_store() -> (Store, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::load(Storage::new(temp_dir.path()));
    (store, temp_dir)
}

/// A minimal session draft for `subject_id` on the given date and time
pub fn draft(subject_id: &str, date: &str, start: &str, duration: u32) -> SessionDraft {
    SessionDraft {
        subject_id: subject_id.to_string(),
        topic_id: None,
        date: parse_date(date),
        start_time: start.parse().expect("valid time"),
        duration,
        kind: SessionKind::Practice,
        goal: String::new(),
        priority: Priority::Medium,
        exertion: None,
    }
}

pub fn parse_date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

#[allow(dead_code)]
pub fn parse_time(s: &str) -> NaiveTime {
    s.parse().expect("valid time")
}
