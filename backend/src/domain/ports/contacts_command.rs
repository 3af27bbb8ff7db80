//! Driving port for contact mutations.
//!
//! Inbound adapters call this port with an already validated
//! [`ContactDraft`]; the acting user always scopes the write.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, Error, UserId};

/// Domain use-case port for creating, updating and deleting contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Create a contact owned by `owner`; a taken email yields a conflict.
    async fn create(&self, owner: &UserId, draft: ContactDraft) -> Result<Contact, Error>;

    /// Overwrite an owned contact; `None` when missing or foreign.
    async fn update(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: ContactDraft,
    ) -> Result<Option<Contact>, Error>;

    /// Delete an owned contact; `None` when missing or foreign.
    async fn delete(&self, owner: &UserId, id: ContactId) -> Result<Option<Contact>, Error>;
}
