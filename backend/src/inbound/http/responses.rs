//! Small response bodies shared across handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain confirmation body, e.g. `{"message":"Item deleted successfully"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "Item deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
