//! Driven port for store connectivity checks.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while probing the store.
    pub enum StoreProbeError {
        /// No connection could be checked out.
        Connection { message: String } => "store connection failed: {message}",
        /// The probe statement failed.
        Query { message: String } => "store probe query failed: {message}",
    }
}

/// Issue a trivial round trip against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Run `SELECT 1`; `Ok` means the store answered.
    async fn ping(&self) -> Result<(), StoreProbeError>;
}
