//! Shared mapping from user persistence failures to domain errors.

use crate::domain::Error;
use crate::domain::ports::UserPersistenceError;

pub(super) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("user email already registered: {email}"))
        }
    }
}
