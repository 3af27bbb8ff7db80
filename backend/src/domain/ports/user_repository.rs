//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same email already exists.
        DuplicateEmail { email: String } => "user email already registered: {email}",
    }
}

/// Fields required to register a user.
///
/// `password` is an opaque credential; hashing is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: String,
    pub password: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
