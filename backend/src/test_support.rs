//! In-memory test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.
//! [`InMemoryRegistryStore`] mirrors the relational constraints the Diesel
//! adapters rely on: unique emails, the owner foreign key, cascade on
//! account deletion, and monotonic ids starting at 1.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, ItemRepository, ItemRepositoryError, StoreProbe,
    StoreProbeError,
};
use crate::domain::{
    Account, AccountId, AccountService, CredentialHash, EmailAddress, HashCost, Item, ItemId,
    ItemService, NewAccount, NewItem, StoreHealthService,
};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

#[derive(Debug, Clone)]
struct AccountRecord {
    email: EmailAddress,
    credential_hash: CredentialHash,
    is_active: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    accounts: BTreeMap<i64, AccountRecord>,
    items: BTreeMap<i64, Item>,
    last_account_id: i64,
    last_item_id: i64,
    unavailable: bool,
}

impl StoreState {
    fn account(&self, id: i64) -> Option<Account> {
        let record = self.accounts.get(&id)?;
        let owned = self
            .items
            .values()
            .filter(|item| item.owner_id().get() == id)
            .cloned()
            .collect();
        Some(Account::new(
            AccountId::from_store(id),
            record.email.clone(),
            record.credential_hash.clone(),
            record.is_active,
            owned,
        ))
    }
}

/// Thread-safe in-memory stand-in for the PostgreSQL store.
///
/// # Examples
/// ```
/// use registry::test_support::InMemoryRegistryStore;
///
/// let store = InMemoryRegistryStore::default();
/// assert_eq!(store.account_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    state: Mutex<StoreState>,
}

impl InMemoryRegistryStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Make every subsequent operation fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of stored accounts.
    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    /// Number of stored items across all owners.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    /// Stored credential hash for `email`, if registered.
    pub fn credential_hash_for(&self, email: &str) -> Option<CredentialHash> {
        self.lock()
            .accounts
            .values()
            .find(|record| record.email.as_ref() == email)
            .map(|record| record.credential_hash.clone())
    }

    fn check_available<E>(&self, state: &StoreState, error: impl FnOnce() -> E) -> Result<(), E> {
        if state.unavailable { Err(error()) } else { Ok(()) }
    }
}

fn account_outage() -> AccountRepositoryError {
    AccountRepositoryError::connection("in-memory store unavailable")
}

fn item_outage() -> ItemRepositoryError {
    ItemRepositoryError::connection("in-memory store unavailable")
}

#[async_trait]
impl AccountRepository for InMemoryRegistryStore {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut state = self.lock();
        self.check_available(&state, account_outage)?;
        if state
            .accounts
            .values()
            .any(|record| record.email == *account.email())
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.email().as_ref(),
            ));
        }

        state.last_account_id += 1;
        let id = state.last_account_id;
        state.accounts.insert(
            id,
            AccountRecord {
                email: account.email().clone(),
                credential_hash: account.credential_hash().clone(),
                is_active: true,
            },
        );
        state
            .account(id)
            .ok_or_else(|| AccountRepositoryError::query("inserted account vanished"))
    }

    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let state = self.lock();
        self.check_available(&state, account_outage)?;
        Ok(state
            .accounts
            .keys()
            .filter_map(|id| state.account(*id))
            .collect())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.lock();
        self.check_available(&state, account_outage)?;
        Ok(state.account(id.get()))
    }

    async fn exists(&self, id: AccountId) -> Result<bool, AccountRepositoryError> {
        let state = self.lock();
        self.check_available(&state, account_outage)?;
        Ok(state.accounts.contains_key(&id.get()))
    }

    async fn delete(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut state = self.lock();
        self.check_available(&state, account_outage)?;
        let Some(snapshot) = state.account(id.get()) else {
            return Ok(None);
        };
        state.items.retain(|_, item| item.owner_id() != id);
        state.accounts.remove(&id.get());
        Ok(Some(snapshot))
    }
}

#[async_trait]
impl ItemRepository for InMemoryRegistryStore {
    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError> {
        let mut state = self.lock();
        self.check_available(&state, item_outage)?;
        let owner_id = item.owner_id().get();
        if !state.accounts.contains_key(&owner_id) {
            return Err(ItemRepositoryError::owner_missing(owner_id));
        }

        state.last_item_id += 1;
        let stored = item.clone().into_item(ItemId::from_store(state.last_item_id));
        state.items.insert(stored.id().get(), stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let state = self.lock();
        self.check_available(&state, item_outage)?;
        Ok(state.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let state = self.lock();
        self.check_available(&state, item_outage)?;
        Ok(state.items.get(&id.get()).cloned())
    }

    async fn delete(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let mut state = self.lock();
        self.check_available(&state, item_outage)?;
        Ok(state.items.remove(&id.get()))
    }
}

#[async_trait]
impl StoreProbe for InMemoryRegistryStore {
    async fn ping(&self) -> Result<(), StoreProbeError> {
        let state = self.lock();
        self.check_available(&state, || {
            StoreProbeError::connection("in-memory store unavailable")
        })
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    /// Instant returned by every call.
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Wire the real services over `store`, as the server does over PostgreSQL.
///
/// Uses bcrypt's minimum cost so tests stay fast.
pub fn http_state_for(store: Arc<InMemoryRegistryStore>, clock: Option<Arc<dyn Clock>>) -> HttpState {
    let clock = clock.unwrap_or_else(|| Arc::new(DefaultClock));
    let cost = HashCost::new(HashCost::MIN).unwrap_or_default();
    let accounts = Arc::new(AccountService::new(store.clone(), cost));
    let items = Arc::new(ItemService::new(store.clone(), store.clone(), clock));
    let health = Arc::new(StoreHealthService::new(store));
    HttpState::new(accounts.clone(), accounts, items.clone(), items, health)
}

/// Fully wired application over `store`: every route, the extractor error
/// handlers, and the [`Trace`] middleware. Readiness starts unset.
pub fn test_app(
    store: Arc<InMemoryRegistryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(http_state_for(store, None)))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
}
