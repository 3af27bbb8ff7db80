//! Driven port for owner-scoped contact persistence.
//!
//! Every method takes the acting user. Adapters must never read or mutate a
//! contact whose owner differs from that user; a foreign contact looks exactly
//! like a missing one.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// Another contact, possibly owned by someone else, already uses the email.
        DuplicateEmail { email: String } =>
            "contact email already in use: {email}",
    }
}

/// Offset pagination window for contact listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Port for contact storage.
///
/// Listings are ordered by ascending contact id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Return at most `page.limit` of the owner's contacts after skipping `page.skip`.
    async fn list(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Return every contact the owner has, unpaginated.
    async fn list_all(&self, owner: &UserId) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Persist a new contact bound to `owner` and return it with its id.
    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError>;

    async fn find(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Overwrite every field of an owned contact in one statement.
    ///
    /// Returns `None`, leaving the store unchanged, when the contact is missing
    /// or foreign.
    async fn update(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Remove an owned contact and return its last stored values.
    async fn delete(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Name matches, then surname matches, then email matches, each by id.
    ///
    /// `info` is matched literally as a substring. A contact matching several
    /// fields appears once per matching field.
    async fn search(
        &self,
        owner: &UserId,
        info: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_page_matches_listing_defaults() {
        assert_eq!(PageRequest::default(), PageRequest::new(0, 100));
    }

    #[rstest]
    fn duplicate_email_message_names_the_address() {
        let err = ContactRepositoryError::duplicate_email("ann@example.com");
        assert_eq!(err.to_string(), "contact email already in use: ann@example.com");
    }
}
