//! Port wiring for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use contacts_backend::domain::ContactsService;
use contacts_backend::domain::ports::{
    ContactRepository, ContactsCommand, ContactsQuery, FixtureLoginService,
    FixtureUserProfileQuery,
};
use contacts_backend::inbound::http::state::{HttpState, HttpStatePorts};
use contacts_backend::outbound::memory::InMemoryContactRepository;
use contacts_backend::outbound::persistence::{
    DbPool, DieselContactRepository, DieselLoginService, DieselUserProfileQuery,
    DieselUserRepository,
};

use super::ServerConfig;

fn contacts_ports<R>(
    repository: R,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn ContactsCommand>, Arc<dyn ContactsQuery>)
where
    R: ContactRepository + 'static,
{
    let service = Arc::new(ContactsService::new(Arc::new(repository), clock));
    (service.clone(), service)
}

fn diesel_ports(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpStatePorts {
    let (contacts, contacts_query) =
        contacts_ports(DieselContactRepository::new(pool.clone()), clock);
    HttpStatePorts {
        login: Arc::new(DieselLoginService::new(DieselUserRepository::new(
            pool.clone(),
        ))),
        profile: Arc::new(DieselUserProfileQuery::new(DieselUserRepository::new(
            pool.clone(),
        ))),
        contacts,
        contacts_query,
    }
}

fn in_memory_ports(clock: Arc<dyn Clock>) -> HttpStatePorts {
    let (contacts, contacts_query) = contacts_ports(InMemoryContactRepository::new(), clock);
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        profile: Arc::new(FixtureUserProfileQuery),
        contacts,
        contacts_query,
    }
}

/// Use PostgreSQL adapters when a pool is configured, in-memory ones otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool, clock),
        None => {
            info!("no database configured; contacts are kept in memory");
            in_memory_ports(clock)
        }
    };
    web::Data::new(HttpState::new(ports))
}
