//! Builders wiring Diesel adapters into the HTTP state ports.

use std::sync::Arc;

use mockable::DefaultClock;
use registry::domain::{AccountService, HashCost, ItemService, StoreHealthService};
use registry::inbound::http::state::HttpState;
use registry::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselItemRepository, DieselStoreProbe,
};

/// Construct the domain services over `pool` and bundle them for handlers.
pub(crate) fn build_http_state(pool: &DbPool, hash_cost: HashCost) -> HttpState {
    let account_repository = Arc::new(DieselAccountRepository::new(pool.clone()));
    let item_repository = Arc::new(DieselItemRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(account_repository.clone(), hash_cost));
    let items = Arc::new(ItemService::new(
        account_repository,
        item_repository,
        Arc::new(DefaultClock),
    ));
    let store_health = Arc::new(StoreHealthService::new(Arc::new(DieselStoreProbe::new(
        pool.clone(),
    ))));

    HttpState::new(accounts.clone(), accounts, items.clone(), items, store_health)
}
