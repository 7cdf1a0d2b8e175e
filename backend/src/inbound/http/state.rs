//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `web::Data` and depend only on
//! driving ports, so they can be tested without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AccountsQuery, ItemsCommand, ItemsQuery, StoreHealthQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account registration and deletion.
    pub accounts: Arc<dyn AccountsCommand>,
    /// Account reads.
    pub accounts_query: Arc<dyn AccountsQuery>,
    /// Item creation and deletion.
    pub items: Arc<dyn ItemsCommand>,
    /// Item reads.
    pub items_query: Arc<dyn ItemsQuery>,
    /// Store connectivity report.
    pub store_health: Arc<dyn StoreHealthQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        accounts: Arc<dyn AccountsCommand>,
        accounts_query: Arc<dyn AccountsQuery>,
        items: Arc<dyn ItemsCommand>,
        items_query: Arc<dyn ItemsQuery>,
        store_health: Arc<dyn StoreHealthQuery>,
    ) -> Self {
        Self {
            accounts,
            accounts_query,
            items,
            items_query,
            store_health,
        }
    }
}
