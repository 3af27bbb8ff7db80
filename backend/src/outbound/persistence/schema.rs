//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Owned by the authentication subsystem.
    users (id) {
        id -> Int4,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 250]
        email -> Varchar,
        #[max_length = 255]
        password -> Varchar,
        created_at -> Nullable<Timestamptz>,
        #[max_length = 255]
        avatar -> Nullable<Varchar>,
        #[max_length = 255]
        refresh_token -> Nullable<Varchar>,
        confirmed -> Nullable<Bool>,
    }
}

diesel::table! {
    /// Address-book entries. `email` is unique across all owners.
    contacts (id) {
        id -> Int4,
        #[max_length = 50]
        name -> Varchar,
        #[max_length = 50]
        surname -> Varchar,
        email -> Varchar,
        #[max_length = 50]
        phone_number -> Nullable<Varchar>,
        birthday -> Date,
        #[max_length = 150]
        description -> Varchar,
        /// Owner; deleting the user cascades to their contacts.
        user_id -> Nullable<Int4>,
    }
}

diesel::joinable!(contacts -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(contacts, users);
