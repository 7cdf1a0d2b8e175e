//! Domain primitives, services, and ports.
//!
//! Purpose: define the account and item entities, their validation rules,
//! and the services that mediate every store interaction through ports.
//! Types here know nothing about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Account / Item with their identifiers and validated inputs.
//! - Credential hashing primitives.
//! - AccountService / ItemService / StoreHealthService implementing the
//!   driving ports in [`ports`].

pub mod account;
mod account_service;
pub mod credential;
pub mod error;
pub mod health;
pub mod item;
mod item_service;
pub mod ports;
mod store_health_service;
pub mod trace_id;

pub use self::account::{
    ACCOUNT_NOT_FOUND, Account, AccountId, AccountValidationError, EmailAddress, NewAccount,
};
pub use self::account_service::AccountService;
pub use self::credential::{
    CREDENTIAL_MAX_BYTES, CREDENTIAL_MAX_CHARS, CREDENTIAL_MIN_CHARS, CredentialError,
    CredentialHash, HashCost, RawCredential, hash_credential, verify_credential,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{HealthReport, HealthStatus};
pub use self::item::{ITEM_NOT_FOUND, Item, ItemDraft, ItemId, ItemValidationError, NewItem};
pub use self::item_service::ItemService;
pub use self::store_health_service::StoreHealthService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use registry::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// # assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
