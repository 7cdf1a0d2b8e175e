//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! no business rules live here. Row structs and the schema stay private to
//! this module.
//!
//! # Example
//!
//! ```no_run
//! use registry::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), registry::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let accounts = DieselAccountRepository::new(pool);
//! # let _ = accounts;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_item_repository;
mod diesel_store_probe;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_item_repository::DieselItemRepository;
pub use diesel_store_probe::DieselStoreProbe;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
