//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use contacts_backend::Trace;
#[cfg(debug_assertions)]
use contacts_backend::doc::ApiDoc;
use contacts_backend::inbound::http::contacts::{
    create_contact, delete_contact, find_contacts, get_contact, list_contacts,
    update_contact, upcoming_birthdays,
};
use contacts_backend::inbound::http::health::{HealthState, live, ready};
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::inbound::http::users::{current_user, login};
use contacts_backend::inbound::http::validation::{json_config, path_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // `find/` and `birthday/` routes precede `{contact_id}` so the literal
    // segments win.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(current_user)
        .service(list_contacts)
        .service(create_contact)
        .service(find_contacts)
        .service(upcoming_birthdays)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the health state ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
