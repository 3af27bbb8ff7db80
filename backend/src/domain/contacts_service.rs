//! Contact domain service.
//!
//! Implements the contact driving ports over a [`ContactRepository`]. The
//! repository enforces owner scoping; this service owns the birthday window
//! and the mapping from persistence failures to domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery, PageRequest,
};
use crate::domain::{BirthdayWindow, Contact, ContactDraft, ContactId, Error, UserId};

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
        ContactRepositoryError::DuplicateEmail { email } => {
            Error::conflict("contact email already in use").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
                "value": email,
            }))
        }
    }
}

/// Contact service implementing [`ContactsCommand`] and [`ContactsQuery`].
#[derive(Clone)]
pub struct ContactsService<R> {
    contact_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactsService<R> {
    /// Create a service over `contact_repo`; `clock` supplies "today" in UTC.
    pub fn new(contact_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            contact_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactsService<R>
where
    R: ContactRepository,
{
    async fn create(&self, owner: &UserId, draft: ContactDraft) -> Result<Contact, Error> {
        let contact = self
            .contact_repo
            .insert(owner, &draft)
            .await
            .map_err(map_repository_error)?;
        debug!(owner = %owner, contact_id = %contact.id(), "contact created");
        Ok(contact)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: ContactDraft,
    ) -> Result<Option<Contact>, Error> {
        self.contact_repo
            .update(owner, id, &draft)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, owner: &UserId, id: ContactId) -> Result<Option<Contact>, Error> {
        let removed = self
            .contact_repo
            .delete(owner, id)
            .await
            .map_err(map_repository_error)?;
        if removed.is_some() {
            debug!(owner = %owner, contact_id = %id, "contact deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactsService<R>
where
    R: ContactRepository,
{
    async fn list(&self, owner: &UserId, page: PageRequest) -> Result<Vec<Contact>, Error> {
        self.contact_repo
            .list(owner, page)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, owner: &UserId, id: ContactId) -> Result<Option<Contact>, Error> {
        self.contact_repo
            .find(owner, id)
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_info(&self, owner: &UserId, info: &str) -> Result<Vec<Contact>, Error> {
        self.contact_repo
            .search(owner, info)
            .await
            .map_err(map_repository_error)
    }

    async fn birthdays_within(&self, owner: &UserId, days: u64) -> Result<Vec<Contact>, Error> {
        let window = BirthdayWindow::new(self.clock.utc().date_naive(), days);
        let contacts = self
            .contact_repo
            .list_all(owner)
            .await
            .map_err(map_repository_error)?;

        Ok(contacts
            .into_iter()
            .filter(|contact| window.contains(contact.birthday()))
            .collect())
    }
}

#[cfg(test)]
#[path = "contacts_service_tests.rs"]
mod tests;
