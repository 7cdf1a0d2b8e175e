//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, NewAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Connection could not be checked out or was lost mid-query.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// The unique email index rejected the insert.
        DuplicateEmail { email: String } =>
            "an account with email {email} already exists",
    }
}

/// Persistence contract for accounts and their owned items.
///
/// Every returned [`Account`] carries its items ordered by item id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert an active account and return it with its assigned id.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// All accounts in id order, items batch-loaded.
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError>;

    /// Look up one account with its items.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Cheap existence check used before dependent writes.
    async fn exists(&self, id: AccountId) -> Result<bool, AccountRepositoryError>;

    /// Remove the account and its items atomically.
    ///
    /// Returns the account as it was before deletion, or `None` when no row
    /// matched.
    async fn delete(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;
}
