//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Error};

/// Read side of the account resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Every account with its items.
    async fn list(&self) -> Result<Vec<Account>, Error>;

    /// A single account with its items, or `NotFound`.
    async fn get(&self, id: AccountId) -> Result<Account, Error>;
}
