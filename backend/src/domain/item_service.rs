//! Item domain service.
//!
//! Items are scoped to an owning account. Creation validates the owner with
//! an explicit existence check before the insert; the store's foreign key
//! covers the window between the check and the write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::account_service::map_account_repository_error;
use crate::domain::ports::{
    AccountRepository, ItemRepository, ItemRepositoryError, ItemsCommand, ItemsQuery,
};
use crate::domain::{
    ACCOUNT_NOT_FOUND, AccountId, Error, ITEM_NOT_FOUND, Item, ItemDraft, ItemId, NewItem,
};

/// Item service implementing [`ItemsCommand`] and [`ItemsQuery`].
#[derive(Clone)]
pub struct ItemService<A, I> {
    accounts: Arc<A>,
    items: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<A, I> ItemService<A, I> {
    /// `clock` supplies the `created_at` stamp for new items.
    pub fn new(accounts: Arc<A>, items: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            items,
            clock,
        }
    }
}

fn map_item_repository_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            warn!(%message, "item store unavailable");
            Error::store_unavailable("Item store unavailable")
        }
        ItemRepositoryError::Query { message } => {
            error!(%message, "item store query failed");
            Error::internal(format!("item repository error: {message}"))
        }
        ItemRepositoryError::OwnerMissing { owner_id } => {
            info!(owner_id, "owner removed before item insert");
            Error::not_found(ACCOUNT_NOT_FOUND)
        }
    }
}

impl<A, I> ItemService<A, I>
where
    A: AccountRepository,
    I: ItemRepository,
{
    async fn require(&self, id: ItemId) -> Result<Item, Error> {
        self.items
            .find_by_id(id)
            .await
            .map_err(map_item_repository_error)?
            .ok_or_else(|| Error::not_found(ITEM_NOT_FOUND))
    }
}

#[async_trait]
impl<A, I> ItemsCommand for ItemService<A, I>
where
    A: AccountRepository,
    I: ItemRepository,
{
    async fn create(&self, owner_id: AccountId, draft: ItemDraft) -> Result<Item, Error> {
        let owner_exists = self
            .accounts
            .exists(owner_id)
            .await
            .map_err(map_account_repository_error)?;
        if !owner_exists {
            return Err(Error::not_found(ACCOUNT_NOT_FOUND));
        }

        let new_item = NewItem::new(owner_id, draft, self.clock.utc());
        let item = self
            .items
            .insert(&new_item)
            .await
            .map_err(map_item_repository_error)?;

        info!(item_id = %item.id(), owner_id = %owner_id, "item created");
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<Item, Error> {
        self.require(id).await?;

        let removed = self
            .items
            .delete(id)
            .await
            .map_err(map_item_repository_error)?
            .ok_or_else(|| Error::not_found(ITEM_NOT_FOUND))?;

        info!(item_id = %id, "item deleted");
        Ok(removed)
    }
}

#[async_trait]
impl<A, I> ItemsQuery for ItemService<A, I>
where
    A: AccountRepository,
    I: ItemRepository,
{
    async fn list(&self) -> Result<Vec<Item>, Error> {
        self.items.list().await.map_err(map_item_repository_error)
    }

    async fn get(&self, id: ItemId) -> Result<Item, Error> {
        self.require(id).await
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
