//! Driving port for the store health report.

use async_trait::async_trait;

use crate::domain::HealthReport;

/// Store connectivity check. Implementations never fail; connectivity
/// problems are reported as a `DOWN` [`HealthReport`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealthQuery: Send + Sync {
    /// Probe the store and describe the outcome.
    async fn check(&self) -> HealthReport;
}
