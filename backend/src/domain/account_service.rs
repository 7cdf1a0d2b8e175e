//! Account domain service.
//!
//! Implements the account driving ports on top of an [`AccountRepository`].
//! Credential hashing runs on Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AccountsCommand, AccountsQuery,
    RegisterAccountRequest,
};
use crate::domain::{
    ACCOUNT_NOT_FOUND, Account, AccountId, CredentialError, Error, HashCost, NewAccount,
    hash_credential,
};

/// Account service implementing [`AccountsCommand`] and [`AccountsQuery`].
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: Arc<R>,
    hash_cost: HashCost,
}

impl<R> AccountService<R> {
    /// Build the service over a repository, hashing new credentials at `hash_cost`.
    pub fn new(accounts: Arc<R>, hash_cost: HashCost) -> Self {
        Self {
            accounts,
            hash_cost,
        }
    }
}

/// Translate account repository failures into domain errors.
pub(crate) fn map_account_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            warn!(%message, "account store unavailable");
            Error::store_unavailable("Account store unavailable")
        }
        AccountRepositoryError::Query { message } => {
            error!(%message, "account store query failed");
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { .. } => {
            Error::duplicate_key("Email already registered").with_context(json!({
                "field": "email",
            }))
        }
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    match error {
        CredentialError::TooShort { .. }
        | CredentialError::TooLong { .. }
        | CredentialError::TooManyBytes { .. } => {
            Error::validation(error.to_string()).with_context(json!({ "field": "password" }))
        }
        CredentialError::InvalidCost { .. } | CredentialError::Hashing { .. } => {
            error!(%error, "credential hashing failed");
            Error::internal(error.to_string())
        }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    async fn require(&self, id: AccountId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_account_repository_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_NOT_FOUND))
    }
}

#[async_trait]
impl<R> AccountsCommand for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, Error> {
        let RegisterAccountRequest { email, credential } = request;
        let cost = self.hash_cost;
        let credential_hash =
            tokio::task::spawn_blocking(move || hash_credential(&credential, cost))
                .await
                .map_err(|err| Error::internal(format!("credential hashing task failed: {err}")))?
                .map_err(map_credential_error)?;

        let account = self
            .accounts
            .insert(&NewAccount::new(email, credential_hash))
            .await
            .map_err(map_account_repository_error)?;

        info!(account_id = %account.id(), "account registered");
        Ok(account)
    }

    async fn delete(&self, id: AccountId) -> Result<Account, Error> {
        self.require(id).await?;

        let removed = self
            .accounts
            .delete(id)
            .await
            .map_err(map_account_repository_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_NOT_FOUND))?;

        info!(
            account_id = %id,
            items_removed = removed.items().len(),
            "account deleted"
        );
        Ok(removed)
    }
}

#[async_trait]
impl<R> AccountsQuery for AccountService<R>
where
    R: AccountRepository,
{
    async fn list(&self) -> Result<Vec<Account>, Error> {
        self.accounts
            .list()
            .await
            .map_err(map_account_repository_error)
    }

    async fn get(&self, id: AccountId) -> Result<Account, Error> {
        self.require(id).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
