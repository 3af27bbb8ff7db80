//! `UserProfileQuery` adapter backed by a `UserRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserProfileQuery, UserRepository};
use crate::domain::{Error, User, UserId};

use super::diesel_user_repository::DieselUserRepository;
use super::user_persistence_error_mapping::map_user_persistence_error;

/// Reads the session user's profile from PostgreSQL.
#[derive(Clone)]
pub struct DieselUserProfileQuery {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselUserProfileQuery {
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self::from_repository(Arc::new(user_repository))
    }

    pub(crate) fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserProfileQuery for DieselUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repository
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn deleted_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id.get() == 4)
            .return_once(|_| Ok(None));

        let err = DieselUserProfileQuery::from_repository(Arc::new(repo))
            .fetch_profile(&UserId::new(4).expect("id"))
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
