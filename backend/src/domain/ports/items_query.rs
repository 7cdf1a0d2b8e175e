//! Driving port for item reads.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemId};

/// Read side of the item resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsQuery: Send + Sync {
    /// Every item across all owners, in id order.
    async fn list(&self) -> Result<Vec<Item>, Error>;

    /// A single item, or `NotFound`.
    async fn get(&self, id: ItemId) -> Result<Item, Error>;
}
