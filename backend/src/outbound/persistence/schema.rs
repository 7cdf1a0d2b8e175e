//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered account holders.
    accounts (id) {
        id -> Int8,
        /// Unique external identifier (`accounts_email_key`).
        email -> Varchar,
        /// bcrypt hash; the raw secret is never stored.
        credential_hash -> Varchar,
        is_active -> Bool,
    }
}

diesel::table! {
    /// Items owned by exactly one account.
    ///
    /// `owner_id` references `accounts.id` with `ON DELETE CASCADE`.
    items (id) {
        id -> Int8,
        owner_id -> Int8,
        title -> Varchar,
        category -> Varchar,
        description -> Nullable<Text>,
        price -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(items -> accounts (owner_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, items);
