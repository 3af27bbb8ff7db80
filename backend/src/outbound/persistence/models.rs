//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them to
//! domain values before returning.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{contacts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub avatar: Option<String>,
    pub confirmed: Option<bool>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub birthday: NaiveDate,
    pub description: String,
    pub user_id: Option<i32>,
}

/// Insertable struct for creating contact records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub phone_number: Option<&'a str>,
    pub birthday: NaiveDate,
    pub description: &'a str,
    pub user_id: i32,
}

/// Full-overwrite changeset for contact updates.
///
/// `treat_none_as_null` clears the phone number when the payload omits it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub phone_number: Option<&'a str>,
    pub birthday: NaiveDate,
    pub description: &'a str,
}
