//! Contact aggregate and its validated write payload.
//!
//! [`ContactDraft`] carries everything a caller may set on a contact; the
//! store assigns the [`ContactId`] and binds the owner.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum length of `name`, `surname` and `phone_number`.
pub const SHORT_FIELD_MAX: usize = 50;
/// Maximum length of `description`.
pub const DESCRIPTION_MAX: usize = 150;
/// Maximum length of `email`.
pub const EMAIL_MAX: usize = 250;

/// Store-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Field of a contact payload that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Surname,
    Email,
    PhoneNumber,
    Description,
}

impl ContactField {
    /// Wire name used in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Description => "description",
        }
    }
}

/// Validation errors returned by [`ContactDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    Empty { field: ContactField },
    TooLong { field: ContactField, max: usize },
    InvalidEmail,
}

impl ContactValidationError {
    pub fn field(&self) -> ContactField {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => *field,
            Self::InvalidEmail => ContactField::Email,
        }
    }

    /// Machine-readable reason, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} must not be empty", field.as_str()),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.as_str())
            }
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn bounded(value: String, field: ContactField, max: usize) -> Result<String, ContactValidationError> {
    if value.chars().count() > max {
        return Err(ContactValidationError::TooLong { field, max });
    }
    Ok(value)
}

fn required(value: String, field: ContactField, max: usize) -> Result<String, ContactValidationError> {
    if value.trim().is_empty() {
        return Err(ContactValidationError::Empty { field });
    }
    bounded(value, field, max)
}

/// Raw contact fields as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraftParts {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub birthday: NaiveDate,
    pub description: String,
}

/// Validated contact payload used by create and update.
///
/// ## Invariants
/// - `name` and `surname` are non-blank and at most 50 characters.
/// - `email` is a syntactically valid address of at most 250 characters.
/// - `phone_number`, when present, is at most 50 characters.
/// - `description` is at most 150 characters and may be empty.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use contacts_backend::domain::{ContactDraft, ContactDraftParts};
///
/// let draft = ContactDraft::new(ContactDraftParts {
///     name: "Ann".into(),
///     surname: "Lee".into(),
///     email: "ann@example.com".into(),
///     phone_number: None,
///     birthday: NaiveDate::from_ymd_opt(1990, 4, 1).expect("date"),
///     description: "college friend".into(),
/// })
/// .expect("valid draft");
/// assert_eq!(draft.email(), "ann@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    surname: String,
    email: String,
    phone_number: Option<String>,
    birthday: NaiveDate,
    description: String,
}

impl ContactDraft {
    pub fn new(parts: ContactDraftParts) -> Result<Self, ContactValidationError> {
        let ContactDraftParts {
            name,
            surname,
            email,
            phone_number,
            birthday,
            description,
        } = parts;

        let name = required(name, ContactField::Name, SHORT_FIELD_MAX)?;
        let surname = required(surname, ContactField::Surname, SHORT_FIELD_MAX)?;
        let email = required(email.trim().to_owned(), ContactField::Email, EMAIL_MAX)?;
        if !email_regex().is_match(&email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        let phone_number = phone_number
            .map(|phone| bounded(phone, ContactField::PhoneNumber, SHORT_FIELD_MAX))
            .transpose()?;
        let description = bounded(description, ContactField::Description, DESCRIPTION_MAX)?;

        Ok(Self {
            name,
            surname,
            email,
            phone_number,
            birthday,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Persisted contact owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    owner: UserId,
    details: ContactDraft,
}

impl Contact {
    pub fn new(id: ContactId, owner: UserId, details: ContactDraft) -> Self {
        Self { id, owner, details }
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn details(&self) -> &ContactDraft {
        &self.details
    }

    pub fn name(&self) -> &str {
        self.details.name()
    }

    pub fn surname(&self) -> &str {
        self.details.surname()
    }

    pub fn email(&self) -> &str {
        self.details.email()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.details.phone_number()
    }

    pub fn birthday(&self) -> NaiveDate {
        self.details.birthday()
    }

    pub fn description(&self) -> &str {
        self.details.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn parts() -> ContactDraftParts {
        ContactDraftParts {
            name: "Ann".to_owned(),
            surname: "Lee".to_owned(),
            email: "ann@example.com".to_owned(),
            phone_number: Some("+44 20 7946 0000".to_owned()),
            birthday: NaiveDate::from_ymd_opt(1990, 4, 1).expect("valid date"),
            description: "college friend".to_owned(),
        }
    }

    #[rstest]
    fn accepts_boundary_lengths(mut parts: ContactDraftParts) {
        parts.name = "n".repeat(SHORT_FIELD_MAX);
        parts.surname = "s".repeat(SHORT_FIELD_MAX);
        parts.phone_number = Some("1".repeat(SHORT_FIELD_MAX));
        parts.description = "d".repeat(DESCRIPTION_MAX);

        let draft = ContactDraft::new(parts).expect("boundary values are valid");
        assert_eq!(draft.description().len(), DESCRIPTION_MAX);
    }

    #[rstest]
    #[case::name(ContactField::Name)]
    #[case::surname(ContactField::Surname)]
    #[case::phone(ContactField::PhoneNumber)]
    fn rejects_short_fields_over_limit(mut parts: ContactDraftParts, #[case] field: ContactField) {
        let long = "x".repeat(SHORT_FIELD_MAX + 1);
        match field {
            ContactField::Name => parts.name = long,
            ContactField::Surname => parts.surname = long,
            ContactField::PhoneNumber => parts.phone_number = Some(long),
            _ => unreachable!("only short fields are exercised"),
        }

        let err = ContactDraft::new(parts).expect_err("over-long field must fail");
        assert_eq!(
            err,
            ContactValidationError::TooLong {
                field,
                max: SHORT_FIELD_MAX
            }
        );
        assert_eq!(err.code(), "too_long");
    }

    #[rstest]
    fn rejects_long_description(mut parts: ContactDraftParts) {
        parts.description = "d".repeat(DESCRIPTION_MAX + 1);
        let err = ContactDraft::new(parts).expect_err("description too long");
        assert_eq!(err.field(), ContactField::Description);
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("missing@tld")]
    #[case("two@@example.com")]
    #[case("spaces in@example.com")]
    fn rejects_invalid_email(mut parts: ContactDraftParts, #[case] email: &str) {
        parts.email = email.to_owned();
        let err = ContactDraft::new(parts).expect_err("invalid email");
        assert_eq!(err.field(), ContactField::Email);
    }

    #[rstest]
    fn trims_email_before_validation(mut parts: ContactDraftParts) {
        parts.email = "  bob@example.org ".to_owned();
        let draft = ContactDraft::new(parts).expect("trimmed email is valid");
        assert_eq!(draft.email(), "bob@example.org");
    }

    #[rstest]
    fn blank_name_is_rejected(mut parts: ContactDraftParts) {
        parts.name = "   ".to_owned();
        let err = ContactDraft::new(parts).expect_err("blank name");
        assert_eq!(err, ContactValidationError::Empty { field: ContactField::Name });
        assert_eq!(err.field().as_str(), "name");
    }

    #[rstest]
    fn phone_and_description_may_be_empty(mut parts: ContactDraftParts) {
        parts.phone_number = None;
        parts.description = String::new();
        let draft = ContactDraft::new(parts).expect("optional values");
        assert!(draft.phone_number().is_none());
        assert!(draft.description().is_empty());
    }
}
