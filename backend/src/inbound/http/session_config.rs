//! Session cookie settings read from the process environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds require every toggle to be present and valid.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Strictness applied when validating session settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Pick the mode matching `cfg!(debug_assertions)`.
    ///
    /// ```
    /// use contacts_backend::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Reasons the session environment is rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate the session settings.
///
/// # Examples
///
/// ```
/// use contacts_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = read_flag(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = read_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Resolve a boolean toggle, falling back to `debug_default` in debug builds.
fn read_flag<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = debug_default, "session toggle not set");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };

    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(variable = name, %value, default = debug_default, "invalid session toggle");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = env.string(SAMESITE_ENV) else {
        if mode.is_debug() {
            warn!("SESSION_SAMESITE not set; using Lax");
            return Ok(fallback);
        }
        return Err(SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(%value, "invalid SESSION_SAMESITE; using Lax");
            Ok(fallback)
        }
        _ => Err(SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value,
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn read_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let result = if !mode.is_debug() && length < SESSION_KEY_MIN_LEN {
        Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        })
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
