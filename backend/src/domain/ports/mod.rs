//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`, `LoginService`) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_repository;
mod contacts_command;
mod contacts_query;
mod login_service;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError, PageRequest};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::ContactsCommand;
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::ContactsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub(crate) use login_service::is_fixture_login;
pub use login_service::{FIXTURE_PASSWORD, FIXTURE_USERNAME, FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserPersistenceError, UserRepository};
