//! Driving port for account mutations.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, EmailAddress, Error, RawCredential};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    /// Login email, already trimmed and non-blank.
    pub email: EmailAddress,
    /// Secret to hash; never stored as given.
    pub credential: RawCredential,
}

/// Account use cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Hash the credential and persist a new active account.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::DuplicateKey`] when the email is taken.
    /// - [`crate::domain::ErrorCode::StoreUnavailable`] when the store is
    ///   unreachable.
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, Error>;

    /// Delete an account together with every item it owns.
    async fn delete(&self, id: AccountId) -> Result<Account, Error>;
}
