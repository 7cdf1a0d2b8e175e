//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.
//! Driven ports (`*Repository`, [`StoreProbe`]) are implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod accounts_command;
mod accounts_query;
mod item_repository;
mod items_command;
mod items_query;
mod store_health_query;
mod store_probe;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccountsCommand, RegisterAccountRequest};
#[cfg(test)]
pub use accounts_query::MockAccountsQuery;
pub use accounts_query::AccountsQuery;
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use items_command::MockItemsCommand;
pub use items_command::ItemsCommand;
#[cfg(test)]
pub use items_query::MockItemsQuery;
pub use items_query::ItemsQuery;
#[cfg(test)]
pub use store_health_query::MockStoreHealthQuery;
pub use store_health_query::StoreHealthQuery;
#[cfg(test)]
pub use store_probe::MockStoreProbe;
pub use store_probe::{StoreProbe, StoreProbeError};
