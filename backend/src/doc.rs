//! OpenAPI document for the contacts API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::User;
use crate::inbound::http::contacts::{ContactRequest, ContactResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;

/// Registers the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contacts API",
        description = "Session-authenticated address book: each user sees only the contacts they own."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::contacts::find_contacts,
        crate::inbound::http::contacts::upcoming_birthdays,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactRequest,
        ContactResponse,
        LoginRequest,
        User,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "contacts", description = "Owner-scoped contact management"),
        (name = "users", description = "Login and the current user's profile"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
