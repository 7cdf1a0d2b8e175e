//! Driven port for item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, NewItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Connection could not be checked out or was lost mid-query.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
        /// The owner foreign key rejected the insert.
        OwnerMissing { owner_id: i64 } =>
            "owner account {owner_id} does not exist",
    }
}

/// Persistence contract for items. Every item belongs to exactly one account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert exactly the fields of `item` and return the stored row.
    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError>;

    /// All items across all owners, ordered by id.
    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Look up one item.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    /// Delete and return the removed row, or `None` when nothing matched.
    async fn delete(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError>;
}
