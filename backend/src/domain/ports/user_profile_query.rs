//! Driving port for the current user's profile.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, User, UserId, UserParts, Username};

use super::FIXTURE_USERNAME;

/// Domain use-case port for reading the authenticated user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}

/// Profile query used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        let username = Username::new(FIXTURE_USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        Ok(User::new(UserParts {
            id: *user_id,
            username,
            email: "admin@example.com".to_owned(),
            avatar: None,
            confirmed: Some(true),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_echoes_requested_id() {
        let user_id = UserId::new(42).expect("user id");
        let user = FixtureUserProfileQuery
            .fetch_profile(&user_id)
            .await
            .expect("profile");
        assert_eq!(user.id(), user_id);
        assert_eq!(user.username().as_ref(), "admin");
    }
}
