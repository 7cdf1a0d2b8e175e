//! Driving port for item mutations.
//!
//! The owner is always passed separately from the draft so callers cannot
//! smuggle an owner through the request body.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, Item, ItemDraft, ItemId};

/// Item use cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsCommand: Send + Sync {
    /// Create an item owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the owner does not exist,
    /// including when it disappears between the check and the insert.
    async fn create(&self, owner_id: AccountId, draft: ItemDraft) -> Result<Item, Error>;

    /// Delete an item, returning it as it was just before removal.
    async fn delete(&self, id: ItemId) -> Result<Item, Error>;
}
