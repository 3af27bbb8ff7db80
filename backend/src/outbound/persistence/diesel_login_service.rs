//! `LoginService` adapter backed by a `UserRepository`.
//!
//! Accepts the fixture account (`admin` / `password`) and makes sure a
//! matching row exists in `users`, so the session user id is a real foreign
//! key target for `contacts.user_id`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{FIXTURE_USERNAME, LoginService, NewUser, UserRepository, is_fixture_login};
use crate::domain::{Error, LoginCredentials, UserId, Username};

use super::diesel_user_repository::DieselUserRepository;
use super::user_persistence_error_mapping::map_user_persistence_error;

const FIXTURE_EMAIL: &str = "admin@example.com";
const FIXTURE_STORED_PASSWORD: &str = "fixture-account";

/// Login service that provisions the fixture user on first sign-in.
#[derive(Clone)]
pub struct DieselLoginService {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self::from_repository(Arc::new(user_repository))
    }

    pub(crate) fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn ensure_fixture_user(&self) -> Result<UserId, Error> {
        let username = Username::new(FIXTURE_USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;

        if let Some(user) = self
            .user_repository
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
        {
            return Ok(user.id());
        }

        let created = self
            .user_repository
            .insert(&NewUser {
                username,
                email: FIXTURE_EMAIL.to_owned(),
                password: FIXTURE_STORED_PASSWORD.to_owned(),
            })
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %created.id(), "provisioned fixture user");
        Ok(created.id())
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if !is_fixture_login(credentials) {
            return Err(Error::unauthorized("invalid credentials"));
        }
        self.ensure_fixture_user().await
    }
}
