//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! for `cfg(test)` and with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{ContactDraft, ContactDraftParts, UserId};

pub use crate::outbound::memory::InMemoryContactRepository;

/// Clock pinned to an instant that tests can move.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock reading midnight UTC on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Build a calendar date, panicking on impossible input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid test date {year}-{month}-{day}"),
    }
}

/// Build a user id, panicking on non-positive input.
pub fn user_id(id: i32) -> UserId {
    match UserId::new(id) {
        Ok(id) => id,
        Err(err) => panic!("invalid test user id {id}: {err}"),
    }
}

/// Valid contact draft with the given identity fields and birthday.
pub fn contact_draft(name: &str, surname: &str, email: &str, birthday: NaiveDate) -> ContactDraft {
    let parts = ContactDraftParts {
        name: name.to_owned(),
        surname: surname.to_owned(),
        email: email.to_owned(),
        phone_number: Some("555-0100".to_owned()),
        birthday,
        description: format!("{name} {surname}"),
    };
    match ContactDraft::new(parts) {
        Ok(draft) => draft,
        Err(err) => panic!("invalid test contact draft: {err}"),
    }
}
