//! Driving port for contact reads.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, Error, UserId};

use super::PageRequest;

/// Domain use-case port for reading an owner's contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    async fn list(&self, owner: &UserId, page: PageRequest) -> Result<Vec<Contact>, Error>;

    async fn get(&self, owner: &UserId, id: ContactId) -> Result<Option<Contact>, Error>;

    /// Substring search over name, surname and email; see
    /// [`super::ContactRepository::search`] for ordering.
    async fn find_by_info(&self, owner: &UserId, info: &str) -> Result<Vec<Contact>, Error>;

    /// Contacts whose birthday falls between today and `days` days from now.
    async fn birthdays_within(&self, owner: &UserId, days: u64) -> Result<Vec<Contact>, Error>;
}
