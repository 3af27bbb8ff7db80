//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed contact and user entities plus the services
//! behind the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - `Contact`, `ContactDraft`, `ContactId`: the address-book aggregate.
//! - `ContactsService`: implements `ContactsCommand` and `ContactsQuery`.
//! - `BirthdayWindow`: the upcoming-birthday rule.
//! - `Error`, `ErrorCode`: transport-agnostic failures.
//! - `User`, `UserId`, `LoginCredentials`: identity of the acting user.

pub mod auth;
pub mod birthday;
pub mod contact;
pub mod contacts_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::birthday::{BirthdayWindow, occurrence_in_year};
pub use self::contact::{
    Contact, ContactDraft, ContactDraftParts, ContactField, ContactId, ContactValidationError,
};
pub use self::contacts_service::ContactsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserParts, UserValidationError, Username};
