//! Upcoming-birthday window.
//!
//! A birthday's occurrence is its month and day placed in the current year.
//! Occurrences earlier than today are out of the window; there is no rollover
//! into the following year.

use chrono::{Datelike, NaiveDate};

/// Place `birthday` in `year`, mapping Feb 29 to Feb 28 in non-leap years.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use contacts_backend::domain::occurrence_in_year;
///
/// let leapling = NaiveDate::from_ymd_opt(2000, 2, 29).expect("date");
/// assert_eq!(
///     occurrence_in_year(leapling, 2023),
///     NaiveDate::from_ymd_opt(2023, 2, 28)
/// );
/// ```
pub fn occurrence_in_year(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day()).or_else(|| {
        (birthday.month() == 2 && birthday.day() == 29)
            .then(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .flatten()
    })
}

/// Inclusive window of `days` days starting today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
    today: NaiveDate,
    days: u64,
}

impl BirthdayWindow {
    pub fn new(today: NaiveDate, days: u64) -> Self {
        Self { today, days }
    }

    /// Whether this year's occurrence of `birthday` lies in `[today, today + days]`.
    pub fn contains(&self, birthday: NaiveDate) -> bool {
        let Some(occurrence) = occurrence_in_year(birthday, self.today.year()) else {
            return false;
        };
        let distance = occurrence.signed_duration_since(self.today).num_days();
        u64::try_from(distance).is_ok_and(|ahead| ahead <= self.days)
    }
}
