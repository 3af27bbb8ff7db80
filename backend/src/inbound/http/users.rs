//! Session and profile handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! GET  /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticate and store the user id in the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = user_id.get(), "session established");
    Ok(HttpResponse::Ok().finish())
}

/// Profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(user))
}
