//! Driving port for establishing a session.
//!
//! Handlers authenticate through this port so HTTP tests can swap in a
//! fixture instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Username accepted by the fixture login flow.
pub const FIXTURE_USERNAME: &str = "admin";
/// Password accepted by the fixture login flow.
pub const FIXTURE_PASSWORD: &str = "password";

/// Whether the credentials are the fixture account's.
pub(crate) fn is_fixture_login(credentials: &LoginCredentials) -> bool {
    credentials.username() == FIXTURE_USERNAME && credentials.password() == FIXTURE_PASSWORD
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// In-memory authenticator used when no database is configured.
///
/// `admin` / `password` authenticates as user 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if !is_fixture_login(credentials) {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(1).map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", Some(1))]
    #[case("admin", "wrong", None)]
    #[case("ann", "password", None)]
    #[tokio::test]
    async fn fixture_login_accepts_only_the_fixture_account(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: Option<i32>,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (expected, result) {
            (Some(id), Ok(user_id)) => assert_eq!(user_id.get(), id),
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (expected, actual) => panic!("expected {expected:?}, got {actual:?}"),
        }
    }
}
