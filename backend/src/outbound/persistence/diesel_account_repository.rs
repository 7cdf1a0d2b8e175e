//! PostgreSQL-backed `AccountRepository`.
//!
//! Account reads load owned items with one batched query per request.
//! Multi-statement operations run in a single transaction on one pooled
//! connection so they observe a consistent snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, NewAccount};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{AccountRow, ItemRow, NewAccountRow, account_from_rows};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, items};

/// Diesel implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Repository over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => AccountRepositoryError::connection(message),
        StoreFailure::UniqueViolation { constraint } => AccountRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        StoreFailure::ForeignKeyViolation { constraint } => {
            AccountRepositoryError::query(format!(
                "unexpected foreign key violation on {}",
                constraint.as_deref().unwrap_or("unknown constraint")
            ))
        }
        StoreFailure::Query(message) => AccountRepositoryError::query(message),
    }
}

fn to_account(row: AccountRow, item_rows: Vec<ItemRow>) -> Result<Account, AccountRepositoryError> {
    account_from_rows(row, item_rows).map_err(AccountRepositoryError::query)
}

async fn load_owned_items(
    conn: &mut AsyncPgConnection,
    owner_id: i64,
) -> Result<Vec<ItemRow>, diesel::result::Error> {
    items::table
        .filter(items::owner_id.eq(owner_id))
        .select(ItemRow::as_select())
        .order_by(items::id)
        .load(conn)
        .await
}

async fn load_account_rows(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<(AccountRow, Vec<ItemRow>)>, diesel::result::Error> {
    let row: Option<AccountRow> = accounts::table
        .find(id)
        .select(AccountRow::as_select())
        .first(conn)
        .await
        .optional()?;
    match row {
        Some(row) => {
            let owned = load_owned_items(conn, row.id).await?;
            Ok(Some((row, owned)))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err) {
                StoreFailure::UniqueViolation { .. } => {
                    AccountRepositoryError::duplicate_email(account.email().as_ref())
                }
                StoreFailure::Connection(message) => AccountRepositoryError::connection(message),
                StoreFailure::ForeignKeyViolation { .. } => {
                    AccountRepositoryError::query("unexpected foreign key violation")
                }
                StoreFailure::Query(message) => AccountRepositoryError::query(message),
            })?;

        to_account(row, Vec::new())
    }

    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (account_rows, item_rows) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let account_rows: Vec<AccountRow> = accounts::table
                        .select(AccountRow::as_select())
                        .order_by(accounts::id)
                        .load(conn)
                        .await?;
                    let item_rows: Vec<ItemRow> = ItemRow::belonging_to(&account_rows)
                        .select(ItemRow::as_select())
                        .order_by(items::id)
                        .load(conn)
                        .await?;
                    Ok((account_rows, item_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let grouped = item_rows.grouped_by(&account_rows);
        account_rows
            .into_iter()
            .zip(grouped)
            .map(|(row, owned)| to_account(row, owned))
            .collect()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        let found = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move { load_account_rows(conn, raw_id).await }.scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        found
            .map(|(row, owned)| to_account(row, owned))
            .transpose()
    }

    async fn exists(&self, id: AccountId) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::id.eq(id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        let removed = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let Some((row, owned)) = load_account_rows(conn, raw_id).await? else {
                        return Ok(None);
                    };
                    diesel::delete(items::table.filter(items::owner_id.eq(raw_id)))
                        .execute(conn)
                        .await?;
                    let deleted = diesel::delete(accounts::table.find(raw_id))
                        .execute(conn)
                        .await?;
                    Ok((deleted == 1).then_some((row, owned)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        removed
            .map(|(row, owned)| to_account(row, owned))
            .transpose()
    }
}
