//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{NewUser, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserParts, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        email,
        created_at,
        avatar,
        confirmed,
    } = row;

    let id = UserId::new(id)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored user id: {err}")))?;
    let username = Username::new(username).map_err(|err| {
        warn!(user_id = %id, error = %err, "stored username fails validation");
        UserPersistenceError::query(format!("invalid stored username: {err}"))
    })?;

    Ok(User::new(UserParts {
        id,
        username,
        email,
        avatar,
        confirmed,
        // The column default is `now()`; rows that predate it carry NULL.
        created_at: created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            username: user.username.as_ref(),
            email: user.email.as_str(),
            password: user.password.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_user(row)
    }
}
