//! Store connectivity report.

/// Name of the backing store reported by health checks.
pub const STORE_NAME: &str = "PostgreSQL";

/// Overall store state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// The store answered the probe.
    Up,
    /// The probe failed.
    Down,
}

impl HealthStatus {
    /// Wire spelling: `UP` or `DOWN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Outcome of a store connectivity check.
///
/// ## Invariants
/// - `Up` reports carry a `message` and no `error`.
/// - `Down` reports carry the failure text in `error` and no `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    status: HealthStatus,
    message: Option<String>,
    error: Option<String>,
}

impl HealthReport {
    /// Healthy report with a human-readable message.
    pub fn up(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Up,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Unhealthy report carrying the failure text.
    pub fn down(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Down,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Overall state.
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Name of the probed store.
    pub fn database(&self) -> &'static str {
        STORE_NAME
    }

    /// Present on `Up` reports.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Present on `Down` reports.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
