//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use registry::domain::{CredentialError, HashCost};
use registry::outbound::persistence::PoolConfig;

use super::settings::AppSettings;

/// Failures turning [`AppSettings`] into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `REGISTRY_BIND_ADDRESS` is not a socket address.
    #[error("invalid bind address: {0}")]
    BindAddress(#[from] std::net::AddrParseError),
    /// `REGISTRY_BCRYPT_COST` is outside bcrypt's range.
    #[error("invalid bcrypt cost: {0}")]
    HashCost(#[from] CredentialError),
}

/// Everything the server needs to start: listener address, pool settings,
/// and the credential work factor.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: PoolConfig,
    pub(crate) hash_cost: HashCost,
}

impl ServerConfig {
    /// Configuration with bcrypt's default cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, pool: PoolConfig) -> Self {
        Self {
            bind_addr,
            pool,
            hash_cost: HashCost::default(),
        }
    }

    /// Override the credential work factor.
    #[must_use]
    pub fn with_hash_cost(mut self, hash_cost: HashCost) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Build the configuration from loaded settings, applying defaults for
    /// anything left unset.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        let mut pool = PoolConfig::new(settings.database_url())
            .with_connection_timeout(Duration::from_secs(5));
        if let Some(max_size) = settings.pool_max_size {
            pool = pool.with_max_size(max_size);
        }
        let hash_cost = HashCost::new(settings.bcrypt_cost)?;
        Ok(Self::new(settings.bind_address()?, pool).with_hash_cost(hash_cost))
    }

    /// Listener address.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
