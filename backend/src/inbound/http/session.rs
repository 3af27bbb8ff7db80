//! Session wrapper exposing the authenticated user id to handlers.
//!
//! The cookie stores the numeric id under `user_id`; anything else in that
//! slot is treated as an anonymous session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<i32>(USER_ID_KEY)
            .map_err(|error| {
                warn!(%error, "unreadable user id in session cookie");
                error
            })
            .ok()
            .flatten();
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!(%error, "invalid user id in session cookie");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
