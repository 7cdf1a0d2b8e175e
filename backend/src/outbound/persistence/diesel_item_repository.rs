//! PostgreSQL-backed `ItemRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, NewItem};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel implementation of [`ItemRepository`].
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Repository over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    ItemRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ItemRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => ItemRepositoryError::connection(message),
        StoreFailure::Query(message) => ItemRepositoryError::query(message),
        failure @ (StoreFailure::UniqueViolation { .. }
        | StoreFailure::ForeignKeyViolation { .. }) => {
            ItemRepositoryError::query(format!("unexpected constraint violation: {failure:?}"))
        }
    }
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_id = item.owner_id().get();

        diesel::insert_into(items::table)
            .values(NewItemRow::from(item))
            .returning(ItemRow::as_returning())
            .get_result::<ItemRow>(&mut conn)
            .await
            .map(Item::from)
            .map_err(|err| match classify_diesel_error(err) {
                StoreFailure::ForeignKeyViolation { .. } => {
                    ItemRepositoryError::owner_missing(owner_id)
                }
                StoreFailure::Connection(message) => ItemRepositoryError::connection(message),
                StoreFailure::UniqueViolation { constraint } => ItemRepositoryError::query(
                    format!("unexpected unique violation on {constraint:?}"),
                ),
                StoreFailure::Query(message) => ItemRepositoryError::query(message),
            })
    }

    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = items::table
            .select(ItemRow::as_select())
            .order_by(items::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = items::table
            .find(id.get())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Item::from))
    }

    async fn delete(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = diesel::delete(items::table.find(id.get()))
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Item::from))
    }
}
