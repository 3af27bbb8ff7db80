//! User identity as seen by the contacts service.
//!
//! Users are created by the authentication subsystem. Contact operations only
//! read the identifier to scope access.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId,
    EmptyUsername,
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "user id must be positive"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned numeric user identifier.
///
/// # Examples
/// ```
/// use contacts_backend::domain::UserId;
///
/// let id = UserId::new(7).expect("positive ids are valid");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum username length accepted by the users table.
pub const USERNAME_MAX: usize = 50;

/// Login name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user profile.
///
/// Password and refresh-token credentials never leave the persistence
/// adapter, so they have no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "admin")]
    username: Username,
    #[schema(example = "admin@example.com")]
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
    created_at: DateTime<Utc>,
}

/// Unvalidated pieces of a stored user row.
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub username: Username,
    pub email: String,
    pub avatar: Option<String>,
    pub confirmed: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(parts: UserParts) -> Self {
        let UserParts {
            id,
            username,
            email,
            avatar,
            confirmed,
            created_at,
        } = parts;
        Self {
            id,
            username,
            email,
            avatar,
            confirmed,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Email confirmation flag; `None` for accounts that predate confirmation.
    pub fn confirmed(&self) -> Option<bool> {
        self.confirmed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
