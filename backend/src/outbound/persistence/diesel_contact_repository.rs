//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `contacts.user_id`, so the ownership check and
//! the read or write happen in the same SQL statement. Update and delete use
//! `RETURNING` and therefore need no prior lookup.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{ContactRepository, ContactRepositoryError, PageRequest};
use crate::domain::{Contact, ContactDraft, ContactDraftParts, ContactId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use contacts_backend::outbound::persistence::{
    ///     DbPool, DieselContactRepository, PoolConfig,
    /// };
    ///
    /// # async fn build() -> Result<(), contacts_backend::outbound::persistence::PoolError> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/contacts")).await?;
    /// let repository = DieselContactRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        ContactRepositoryError,
    > {
        self.pool.get().await.map_err(map_pool_error)
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    map_basic_pool_error(error, |message| {
        ContactRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: DieselError) -> ContactRepositoryError {
    map_basic_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

/// Map a write failure, attributing unique violations to `email`.
///
/// `contacts.email` is the only unique column besides the primary key.
fn map_write_error(error: DieselError, email: &str) -> ContactRepositoryError {
    if is_unique_violation(&error) {
        return ContactRepositoryError::duplicate_email(email);
    }
    map_diesel_error(error)
}

/// Escape `LIKE` metacharacters so `info` matches literally, then wrap in `%`.
fn contains_pattern(info: &str) -> String {
    let mut pattern = String::with_capacity(info.len() + 2);
    pattern.push('%');
    for ch in info.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `OFFSET`/`LIMIT` take a signed bigint; larger values behave as unbounded.
fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn row_to_contact(row: ContactRow, owner: &UserId) -> Result<Contact, ContactRepositoryError> {
    let ContactRow {
        id,
        name,
        surname,
        email,
        phone_number,
        birthday,
        description,
        user_id,
    } = row;

    if user_id != Some(owner.get()) {
        warn!(contact_id = id, "contact row escaped owner filter");
        return Err(ContactRepositoryError::query("contact owner mismatch"));
    }

    let draft = ContactDraft::new(ContactDraftParts {
        name,
        surname,
        email,
        phone_number,
        birthday,
        description,
    })
    .map_err(|err| {
        warn!(contact_id = id, error = %err, "stored contact fails validation");
        ContactRepositoryError::query(format!("invalid stored contact {id}: {err}"))
    })?;

    Ok(Contact::new(ContactId::new(id), *owner, draft))
}

fn rows_to_contacts(
    rows: Vec<ContactRow>,
    owner: &UserId,
) -> Result<Vec<Contact>, ContactRepositoryError> {
    rows.into_iter()
        .map(|row| row_to_contact(row, owner))
        .collect()
}

fn changeset(draft: &ContactDraft) -> ContactChangeset<'_> {
    ContactChangeset {
        name: draft.name(),
        surname: draft.surname(),
        email: draft.email(),
        phone_number: draft.phone_number(),
        birthday: draft.birthday(),
        description: draft.description(),
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::user_id.eq(owner.get()))
            .order(contacts::id.asc())
            .offset(sql_bound(page.skip))
            .limit(sql_bound(page.limit))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_contacts(rows, owner)
    }

    async fn list_all(&self, owner: &UserId) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::user_id.eq(owner.get()))
            .order(contacts::id.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_contacts(rows, owner)
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let new_row = NewContactRow {
            name: draft.name(),
            surname: draft.surname(),
            email: draft.email(),
            phone_number: draft.phone_number(),
            birthday: draft.birthday(),
            description: draft.description(),
            user_id: owner.get(),
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.email()))?;

        row_to_contact(row, owner)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::user_id.eq(owner.get()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_contact(row, owner)).transpose()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ContactRow> = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id.get()))
                .filter(contacts::user_id.eq(owner.get())),
        )
        .set(&changeset(draft))
        .returning(ContactRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_write_error(err, draft.email()))?;

        row.map(|row| row_to_contact(row, owner)).transpose()
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ContactRow> = diesel::delete(
            contacts::table
                .filter(contacts::id.eq(id.get()))
                .filter(contacts::user_id.eq(owner.get())),
        )
        .returning(ContactRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(|row| row_to_contact(row, owner)).transpose()
    }

    async fn search(
        &self,
        owner: &UserId,
        info: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let pattern = contains_pattern(info);
        let owner_id = owner.get();

        let rows: Vec<ContactRow> = conn
            .build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let scoped = || {
                        contacts::table
                            .filter(contacts::user_id.eq(owner_id))
                            .order(contacts::id.asc())
                            .select(ContactRow::as_select())
                    };

                    let mut rows: Vec<ContactRow> = scoped()
                        .filter(contacts::name.like(&pattern).escape('\\'))
                        .load(conn)
                        .await?;
                    let by_surname: Vec<ContactRow> = scoped()
                        .filter(contacts::surname.like(&pattern).escape('\\'))
                        .load(conn)
                        .await?;
                    let by_email: Vec<ContactRow> = scoped()
                        .filter(contacts::email.like(&pattern).escape('\\'))
                        .load(conn)
                        .await?;

                    rows.extend(by_surname);
                    rows.extend(by_email);
                    Ok(rows)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_contacts(rows, owner)
    }
}
