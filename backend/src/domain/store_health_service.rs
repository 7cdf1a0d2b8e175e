//! Store health service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::HealthReport;
use crate::domain::ports::{StoreHealthQuery, StoreProbe};

/// Reports store connectivity through a [`StoreProbe`].
#[derive(Clone)]
pub struct StoreHealthService<P> {
    probe: Arc<P>,
}

impl<P> StoreHealthService<P> {
    /// Wrap a store probe.
    pub fn new(probe: Arc<P>) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl<P> StoreHealthQuery for StoreHealthService<P>
where
    P: StoreProbe,
{
    async fn check(&self) -> HealthReport {
        match self.probe.ping().await {
            Ok(()) => HealthReport::up("Database connection successful"),
            Err(err) => {
                warn!(error = %err, "store health check failed");
                HealthReport::down(err.to_string())
            }
        }
    }
}
