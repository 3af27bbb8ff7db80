//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! contain no business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use contacts_backend::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), contacts_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/contacts")).await?;
//! let contacts = DieselContactRepository::new(pool);
//! # let _ = contacts;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_repository;
mod diesel_login_service;
mod diesel_user_profile_query;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod user_persistence_error_mapping;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_user_profile_query::DieselUserProfileQuery;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
