//! In-memory `ContactRepository` adapter.
//!
//! Mirrors the PostgreSQL adapter: owner scoping on every call, store-wide
//! email uniqueness, ascending-id ordering and non-deduplicated search.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ContactRepository, ContactRepositoryError, PageRequest};
use crate::domain::{Contact, ContactDraft, ContactId, UserId};

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    contacts: BTreeMap<ContactId, Contact>,
}

impl Store {
    fn owned<'a>(&'a self, owner: &'a UserId) -> impl Iterator<Item = &'a Contact> + 'a {
        self.contacts
            .values()
            .filter(move |contact| contact.owner() == *owner)
    }

    fn email_taken(&self, email: &str, except: Option<ContactId>) -> bool {
        self.contacts
            .values()
            .any(|contact| contact.email() == email && Some(contact.id()) != except)
    }
}

/// Contact repository backed by a mutex-guarded ordered map.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    store: Mutex<Store>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ContactRepositoryError> {
        self.store
            .lock()
            .map_err(|_| ContactRepositoryError::query("in-memory contact store poisoned"))
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .owned(owner)
            .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn list_all(&self, owner: &UserId) -> Result<Vec<Contact>, ContactRepositoryError> {
        let store = self.lock()?;
        Ok(store.owned(owner).cloned().collect())
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut store = self.lock()?;
        if store.email_taken(draft.email(), None) {
            return Err(ContactRepositoryError::duplicate_email(draft.email()));
        }
        store.next_id += 1;
        let contact = Contact::new(ContactId::new(store.next_id), *owner, draft.clone());
        store.contacts.insert(contact.id(), contact.clone());
        Ok(contact)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .contacts
            .get(&id)
            .filter(|contact| contact.owner() == *owner)
            .cloned())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut store = self.lock()?;
        let owned = store
            .contacts
            .get(&id)
            .is_some_and(|contact| contact.owner() == *owner);
        if !owned {
            return Ok(None);
        }
        if store.email_taken(draft.email(), Some(id)) {
            return Err(ContactRepositoryError::duplicate_email(draft.email()));
        }
        let updated = Contact::new(id, *owner, draft.clone());
        store.contacts.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut store = self.lock()?;
        let owned = store
            .contacts
            .get(&id)
            .is_some_and(|contact| contact.owner() == *owner);
        Ok(if owned { store.contacts.remove(&id) } else { None })
    }

    async fn search(
        &self,
        owner: &UserId,
        info: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let store = self.lock()?;
        let fields: [fn(&Contact) -> &str; 3] = [Contact::name, Contact::surname, Contact::email];
        Ok(fields
            .iter()
            .flat_map(|field| {
                store
                    .owned(owner)
                    .filter(move |contact| field(contact).contains(info))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use crate::domain::ContactDraftParts;

    fn draft(name: &str, surname: &str, email: &str) -> ContactDraft {
        ContactDraft::new(ContactDraftParts {
            name: name.to_owned(),
            surname: surname.to_owned(),
            email: email.to_owned(),
            phone_number: None,
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"),
            description: String::new(),
        })
        .expect("valid draft")
    }

    fn user(id: i32) -> UserId {
        UserId::new(id).expect("user id")
    }

    #[fixture]
    fn repo() -> InMemoryContactRepository {
        InMemoryContactRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order(repo: InMemoryContactRepository) {
        let first = repo.insert(&user(1), &draft("A", "A", "a@x.io")).await.expect("insert");
        let second = repo.insert(&user(2), &draft("B", "B", "b@x.io")).await.expect("insert");
        assert!(first.id() < second.id());
    }

    #[rstest]
    #[tokio::test]
    async fn update_may_keep_its_own_email(repo: InMemoryContactRepository) {
        let owner = user(1);
        let created = repo.insert(&owner, &draft("A", "A", "a@x.io")).await.expect("insert");
        let updated = repo
            .update(&owner, created.id(), &draft("Z", "A", "a@x.io"))
            .await
            .expect("update")
            .expect("owned");
        assert_eq!(updated.name(), "Z");
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_email_of_another_contact(repo: InMemoryContactRepository) {
        let owner = user(1);
        repo.insert(&user(2), &draft("B", "B", "b@x.io")).await.expect("insert");
        let created = repo.insert(&owner, &draft("A", "A", "a@x.io")).await.expect("insert");
        let err = repo
            .update(&owner, created.id(), &draft("A", "A", "b@x.io"))
            .await
            .expect_err("duplicate email");
        assert_eq!(err, ContactRepositoryError::duplicate_email("b@x.io"));
    }

    #[rstest]
    #[tokio::test]
    async fn search_treats_wildcards_literally(repo: InMemoryContactRepository) {
        let owner = user(1);
        repo.insert(&owner, &draft("100%", "X", "p@x.io")).await.expect("insert");
        repo.insert(&owner, &draft("1000", "X", "q@x.io")).await.expect("insert");
        let found = repo.search(&owner, "0%").await.expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "100%");
    }
}
