//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code and serialises [`Error`] as the response
//! envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed validation before reaching the store.
    ValidationFailed,
    /// A referenced account or item does not exist.
    NotFound,
    /// A uniqueness constraint rejected the write.
    DuplicateKey,
    /// The relational store could not be reached.
    StoreUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

impl ErrorCode {
    fn fallback_detail(self) -> &'static str {
        match self {
            Self::ValidationFailed => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::DuplicateKey => "Resource already exists",
            Self::StoreUnavailable => "Store unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Error payload shared by services and adapters.
///
/// ## Invariants
/// - `detail` is non-empty once trimmed of whitespace.
/// - `trace_id`, when present, is non-empty.
///
/// # Examples
/// ```
/// use registry::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Item not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.detail(), "Item not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    detail: String,
    trace_id: Option<String>,
    context: Option<Value>,
}

/// Validation failures raised when constructing an [`Error`] from raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// Detail was blank.
    EmptyDetail,
    /// Trace identifier was blank.
    EmptyTraceId,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDetail => write!(f, "error detail must not be empty"),
            Self::EmptyTraceId => write!(f, "trace identifier must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Build an error, capturing the trace identifier in scope.
    ///
    /// A blank `detail` is replaced with a generic description of `code`.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let detail = if detail.trim().is_empty() {
            code.fallback_detail().to_owned()
        } else {
            detail
        };
        Self {
            code,
            detail,
            trace_id: TraceId::current().map(|id| id.to_string()),
            context: None,
        }
    }

    /// Fallible constructor that rejects blank details.
    pub fn try_new(code: ErrorCode, detail: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let detail = detail.into();
        if detail.trim().is_empty() {
            return Err(ErrorValidationError::EmptyDetail);
        }
        Ok(Self::new(code, detail))
    }

    /// Stable machine-readable category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable description returned to clients.
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// Trace identifier captured when the error was built, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured information such as the offending field.
    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Attach structured context to the error.
    ///
    /// # Examples
    /// ```
    /// use registry::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::validation("price must not be negative")
    ///     .with_context(json!({ "field": "price" }));
    /// assert!(err.context().is_some());
    /// ```
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Fallible variant of [`Error::with_trace_id`] rejecting blank values.
    pub fn try_with_trace_id(
        self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(trace_id))
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, detail)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, detail)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateKey`].
    pub fn duplicate_key(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateKey, detail)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, detail)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        let Error {
            code,
            detail,
            trace_id,
            context,
        } = value;
        Self {
            code,
            detail,
            trace_id,
            context,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            detail,
            trace_id,
            context,
        } = value;

        let mut error = Error::try_new(code, detail)?;
        error.trace_id = None;
        if let Some(id) = trace_id {
            error = error.try_with_trace_id(id)?;
        }
        error.context = context;
        Ok(error)
    }
}
