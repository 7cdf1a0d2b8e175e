//! `SELECT 1` connectivity probe.

use async_trait::async_trait;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreProbe, StoreProbeError};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::pool::DbPool;

/// Diesel implementation of [`StoreProbe`].
#[derive(Clone)]
pub struct DieselStoreProbe {
    pool: DbPool,
}

impl DieselStoreProbe {
    /// Probe connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreProbe for DieselStoreProbe {
    async fn ping(&self) -> Result<(), StoreProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| StoreProbeError::connection(err.into_message()))?;

        diesel::select(diesel::dsl::sql::<Integer>("1"))
            .get_result::<i32>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match classify_diesel_error(err) {
                StoreFailure::Connection(message) => StoreProbeError::connection(message),
                StoreFailure::Query(message) => StoreProbeError::query(message),
                StoreFailure::UniqueViolation { .. } | StoreFailure::ForeignKeyViolation { .. } => {
                    StoreProbeError::query("unexpected constraint violation")
                }
            })
    }
}
