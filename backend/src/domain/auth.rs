//! Login credentials accepted by the session endpoint.

use std::fmt;

use zeroize::Zeroizing;

use super::user::USERNAME_MAX;

/// Reasons a login payload is rejected before reaching a login service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Username and password pair; the password is zeroed on drop.
///
/// # Examples
/// ```
/// use contacts_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Trim the username and check both parts are present.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(LoginValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("  ", "pw", LoginValidationError::EmptyUsername)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    fn rejects_missing_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("incomplete credentials must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_usernames_longer_than_the_column() {
        let username = "u".repeat(USERNAME_MAX + 1);
        let err = LoginCredentials::try_from_parts(&username, "pw").expect_err("too long");
        assert_eq!(err, LoginValidationError::UsernameTooLong { max: USERNAME_MAX });
    }

    #[rstest]
    fn keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("admin", " pass ").expect("valid");
        assert_eq!(creds.password(), " pass ");
    }
}
