//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactsCommand, ContactsQuery, LoginService, UserProfileQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
}

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use contacts_backend::domain::ContactsService;
/// use contacts_backend::domain::ports::{FixtureLoginService, FixtureUserProfileQuery};
/// use contacts_backend::inbound::http::state::{HttpState, HttpStatePorts};
/// use contacts_backend::outbound::memory::InMemoryContactRepository;
///
/// let service = Arc::new(ContactsService::new(
///     Arc::new(InMemoryContactRepository::new()),
///     Arc::new(mockable::DefaultClock),
/// ));
/// let state = HttpState::new(HttpStatePorts {
///     login: Arc::new(FixtureLoginService),
///     profile: Arc::new(FixtureUserProfileQuery),
///     contacts: service.clone(),
///     contacts_query: service,
/// });
/// let _contacts = state.contacts.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            profile,
            contacts,
            contacts_query,
        } = ports;
        Self {
            login,
            profile,
            contacts,
            contacts_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
