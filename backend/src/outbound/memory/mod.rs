//! Process-local adapters used when no database is configured.
//!
//! State lives for the lifetime of the process and is lost on restart.

mod contact_repository;

pub use contact_repository::InMemoryContactRepository;
